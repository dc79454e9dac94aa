use anyhow::{anyhow, Result};
use chrono::Datelike;
use serde_json::{json, Value};

use crate::cli::calendar::{parse_month, MonthGrid};
use crate::cli::client::ApiClient;
use crate::cli::OutputFormat;

/// Render a month of logged sessions; defaults to the current month
pub async fn handle(
    client: &ApiClient,
    month: Option<&str>,
    output_format: OutputFormat,
) -> Result<()> {
    let (year, month) = match month {
        Some(raw) => parse_month(raw).ok_or_else(|| anyhow!("month must look like YYYY-MM"))?,
        None => {
            let today = chrono::Local::now().date_naive();
            (today.year(), today.month())
        }
    };

    let workouts = client.list_workouts(None).await?;
    let dates: Vec<String> = workouts
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|w| w.get("date").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let grid = MonthGrid::build(year, month, &dates)
        .ok_or_else(|| anyhow!("invalid month {year:04}-{month:02}"))?;

    match output_format {
        OutputFormat::Json => {
            let mut days: Vec<u32> = grid.workout_days.iter().copied().collect();
            days.sort_unstable();
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "year": grid.year,
                    "month": grid.month,
                    "days_in_month": grid.days_in_month,
                    "workout_days": days,
                }))?
            );
        }
        OutputFormat::Text => print!("{}", grid.render()),
    }
    Ok(())
}
