pub mod calendar;
pub mod client;
pub mod commands;
pub mod search;
pub mod utils;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gym")]
#[command(about = "Gym CLI - Command-line client for the Gym Tracker API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Browse logged sessions on a month calendar")]
    Calendar {
        #[arg(long, help = "Month to display as YYYY-MM (defaults to the current month)")]
        month: Option<String>,
    },

    #[command(about = "Workout session management")]
    Workout {
        #[command(subcommand)]
        cmd: commands::workout::WorkoutCommands,
    },

    #[command(about = "Exercise template management")]
    Template {
        #[command(subcommand)]
        cmd: commands::template::TemplateCommands,
    },

    #[command(about = "Exercise name autocomplete (one-shot or interactive)")]
    Search {
        #[arg(help = "Query text; omit for interactive search-as-you-type")]
        query: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = client::ApiClient::from_env();

    match cli.command {
        Commands::Calendar { month } => {
            commands::calendar::handle(&client, month.as_deref(), output_format).await
        }
        Commands::Workout { cmd } => commands::workout::handle(&client, cmd, output_format).await,
        Commands::Template { cmd } => commands::template::handle(&client, cmd, output_format).await,
        Commands::Search { query } => {
            commands::search::handle(client, query.as_deref(), output_format).await
        }
    }
}
