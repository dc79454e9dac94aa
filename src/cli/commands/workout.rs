use anyhow::Result;
use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::client::ApiClient;
use crate::cli::utils::{
    output_success, parse_exercises_arg, print_workout_detail, print_workout_line,
};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum WorkoutCommands {
    #[command(about = "List sessions, newest first")]
    List {
        #[arg(long, help = "Only sessions on this date (YYYY-MM-DD)")]
        date: Option<String>,
    },

    #[command(about = "Show one session with its exercises")]
    Show {
        #[arg(help = "Workout ID")]
        id: String,
    },

    #[command(about = "Log a new session")]
    Log {
        #[arg(long, help = "Session title")]
        title: String,
        #[arg(long, help = "Session date (YYYY-MM-DD, defaults to today)")]
        date: Option<String>,
        #[arg(long, help = "Exercises as a JSON array")]
        exercises: Option<String>,
    },

    #[command(about = "Update a session's title, date, or exercise list")]
    Edit {
        #[arg(help = "Workout ID")]
        id: String,
        #[arg(long, help = "New title")]
        title: Option<String>,
        #[arg(long, help = "New date (YYYY-MM-DD)")]
        date: Option<String>,
        #[arg(long, help = "Replacement exercises as a JSON array")]
        exercises: Option<String>,
    },

    #[command(about = "Delete a session and its exercises")]
    Delete {
        #[arg(help = "Workout ID")]
        id: String,
    },
}

pub async fn handle(
    client: &ApiClient,
    cmd: WorkoutCommands,
    output_format: OutputFormat,
) -> Result<()> {
    match cmd {
        WorkoutCommands::List { date } => {
            let workouts = client.list_workouts(date.as_deref()).await?;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&workouts)?),
                OutputFormat::Text => {
                    let list = workouts.as_array().cloned().unwrap_or_default();
                    if list.is_empty() {
                        println!("No workouts logged yet.");
                    }
                    for workout in &list {
                        print_workout_line(workout);
                    }
                }
            }
            Ok(())
        }
        WorkoutCommands::Show { id } => {
            let workout = client.get_workout(&id).await?;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&workout)?),
                OutputFormat::Text => print_workout_detail(&workout),
            }
            Ok(())
        }
        WorkoutCommands::Log { title, date, exercises } => {
            let date = date.unwrap_or_else(today);
            let mut body = json!({ "title": title, "date": date });
            if let Some(raw) = exercises {
                body["exercises"] = parse_exercises_arg(&raw)?;
            }
            let workout = client.create_workout(&body).await?;
            output_success(output_format, "Workout logged", Some(&workout))
        }
        WorkoutCommands::Edit { id, title, date, exercises } => {
            let mut body = json!({});
            if let Some(title) = title {
                body["title"] = Value::String(title);
            }
            if let Some(date) = date {
                body["date"] = Value::String(date);
            }
            if let Some(raw) = exercises {
                body["exercises"] = parse_exercises_arg(&raw)?;
            }
            let workout = client.update_workout(&id, &body).await?;
            output_success(output_format, "Workout updated", Some(&workout))
        }
        WorkoutCommands::Delete { id } => {
            let response = client.delete_workout(&id).await?;
            output_success(output_format, "Workout deleted", Some(&response))
        }
    }
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
