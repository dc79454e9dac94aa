use anyhow::Result;
use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::client::ApiClient;
use crate::cli::utils::{
    output_success, parse_exercises_arg, print_template_detail, print_template_line,
};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum TemplateCommands {
    #[command(about = "List saved templates, newest first")]
    List,

    #[command(about = "Show one template with its exercises")]
    Show {
        #[arg(help = "Template ID")]
        id: String,
    },

    #[command(about = "Save a reusable template")]
    Save {
        #[arg(long, help = "Template name")]
        name: String,
        #[arg(long, help = "Exercises as a JSON array (no weight field)")]
        exercises: Option<String>,
    },

    #[command(about = "Update a template's name or exercise list")]
    Edit {
        #[arg(help = "Template ID")]
        id: String,
        #[arg(long, help = "New name")]
        name: Option<String>,
        #[arg(long, help = "Replacement exercises as a JSON array")]
        exercises: Option<String>,
    },

    #[command(about = "Delete a template and its exercises")]
    Delete {
        #[arg(help = "Template ID")]
        id: String,
    },

    #[command(about = "Log a new workout from a template (weights start at 0)")]
    Start {
        #[arg(help = "Template ID")]
        id: String,
        #[arg(long, help = "Session date (YYYY-MM-DD, defaults to today)")]
        date: Option<String>,
    },
}

pub async fn handle(
    client: &ApiClient,
    cmd: TemplateCommands,
    output_format: OutputFormat,
) -> Result<()> {
    match cmd {
        TemplateCommands::List => {
            let templates = client.list_templates().await?;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&templates)?),
                OutputFormat::Text => {
                    let list = templates.as_array().cloned().unwrap_or_default();
                    if list.is_empty() {
                        println!("No templates saved yet.");
                    }
                    for template in &list {
                        print_template_line(template);
                    }
                }
            }
            Ok(())
        }
        TemplateCommands::Show { id } => {
            let template = client.get_template(&id).await?;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&template)?),
                OutputFormat::Text => print_template_detail(&template),
            }
            Ok(())
        }
        TemplateCommands::Save { name, exercises } => {
            let mut body = json!({ "name": name });
            if let Some(raw) = exercises {
                body["exercises"] = parse_exercises_arg(&raw)?;
            }
            let template = client.create_template(&body).await?;
            output_success(output_format, "Template saved", Some(&template))
        }
        TemplateCommands::Edit { id, name, exercises } => {
            let mut body = json!({});
            if let Some(name) = name {
                body["name"] = Value::String(name);
            }
            if let Some(raw) = exercises {
                body["exercises"] = parse_exercises_arg(&raw)?;
            }
            let template = client.update_template(&id, &body).await?;
            output_success(output_format, "Template updated", Some(&template))
        }
        TemplateCommands::Delete { id } => {
            let response = client.delete_template(&id).await?;
            output_success(output_format, "Template deleted", Some(&response))
        }
        TemplateCommands::Start { id, date } => {
            let template = client.get_template(&id).await?;
            let date = date.unwrap_or_else(today);
            let body = workout_from_template(&template, &date);
            let workout = client.create_workout(&body).await?;
            output_success(output_format, "Workout started from template", Some(&workout))
        }
    }
}

/// Convert a template into a loggable workout: the title comes from the
/// template name, sets/reps carry over, and weight resets to 0 because it
/// is workout-specific.
pub fn workout_from_template(template: &Value, date: &str) -> Value {
    let title = template
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("Workout");
    let exercises: Vec<Value> = template
        .get("exercises")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .map(|te| {
                    json!({
                        "exercise_name": te.get("exercise_name").cloned().unwrap_or(Value::Null),
                        "weight": 0,
                        "sets": te.get("sets").cloned().unwrap_or(Value::Null),
                        "reps": te.get("reps").cloned().unwrap_or(Value::Null),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    json!({ "title": title, "date": date, "exercises": exercises })
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
