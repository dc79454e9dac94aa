use anyhow::{anyhow, Result};
use serde_json::Value;

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: OutputFormat, message: &str, data: Option<&Value>) -> Result<()> {
    match output_format {
        OutputFormat::Json => {
            let body = data.cloned().unwrap_or_else(|| Value::String(message.to_string()));
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Parse an --exercises argument as a JSON array
pub fn parse_exercises_arg(raw: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| anyhow!("exercises must be a JSON array: {e}"))?;
    if !value.is_array() {
        return Err(anyhow!("exercises must be a JSON array"));
    }
    Ok(value)
}

/// One-line summary of a workout session
pub fn print_workout_line(workout: &Value) {
    let id = workout.get("id").and_then(Value::as_str).unwrap_or("?");
    let title = workout.get("title").and_then(Value::as_str).unwrap_or("?");
    let date = workout.get("date").and_then(Value::as_str).unwrap_or("?");
    let count = workout
        .get("exercises")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    println!("{date}  {title}  ({count} exercises)  [{id}]");
}

/// Full workout detail with its exercise rows in display order
pub fn print_workout_detail(workout: &Value) {
    print_workout_line(workout);
    if let Some(exercises) = workout.get("exercises").and_then(Value::as_array) {
        for exercise in exercises {
            let name = exercise.get("exercise_name").and_then(Value::as_str).unwrap_or("?");
            let weight = exercise.get("weight").and_then(Value::as_f64).unwrap_or(0.0);
            let sets = exercise.get("sets").and_then(Value::as_i64).unwrap_or(0);
            let reps = exercise.get("reps").and_then(Value::as_i64).unwrap_or(0);
            println!("  {name}: {sets} x {reps} @ {weight}");
        }
    }
}

/// One-line summary of a template
pub fn print_template_line(template: &Value) {
    let id = template.get("id").and_then(Value::as_str).unwrap_or("?");
    let name = template.get("name").and_then(Value::as_str).unwrap_or("?");
    let count = template
        .get("exercises")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    println!("{name}  ({count} exercises)  [{id}]");
}

/// Full template detail; template exercises carry no weight
pub fn print_template_detail(template: &Value) {
    print_template_line(template);
    if let Some(exercises) = template.get("exercises").and_then(Value::as_array) {
        for exercise in exercises {
            let name = exercise.get("exercise_name").and_then(Value::as_str).unwrap_or("?");
            let sets = exercise.get("sets").and_then(Value::as_i64).unwrap_or(0);
            let reps = exercise.get("reps").and_then(Value::as_i64).unwrap_or(0);
            println!("  {name}: {sets} x {reps}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exercises_arg_must_be_an_array() {
        assert!(parse_exercises_arg("[]").is_ok());
        assert!(parse_exercises_arg(r#"[{"exercise_name":"Plank","weight":0,"sets":3,"reps":1}]"#).is_ok());
        assert!(parse_exercises_arg(r#"{"exercise_name":"Plank"}"#).is_err());
        assert!(parse_exercises_arg("not json").is_err());
    }
}
