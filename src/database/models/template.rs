use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::workout::parse_positive_count;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Template {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub created_at: String,
}

/// Template exercises carry no weight; weight is workout-specific.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TemplateExercise {
    pub id: String,
    pub template_id: String,
    pub exercise_name: String,
    pub sets: i64,
    pub reps: i64,
    pub order_index: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateWithExercises {
    #[serde(flatten)]
    pub template: Template,
    pub exercises: Vec<TemplateExercise>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateExerciseInput {
    pub exercise_name: String,
    pub sets: i64,
    pub reps: i64,
}

/// Validated body for POST /api/templates
#[derive(Debug, Clone)]
pub struct NewTemplate {
    pub name: String,
    pub exercises: Vec<TemplateExerciseInput>,
}

/// Validated body for PUT /api/templates/:id
#[derive(Debug, Clone, Default)]
pub struct TemplatePatch {
    pub name: Option<String>,
    pub exercises: Option<Vec<TemplateExerciseInput>>,
}

impl NewTemplate {
    pub fn from_value(body: &Value) -> Result<Self, String> {
        let name = match body.get("name").and_then(Value::as_str) {
            Some(n) if !n.trim().is_empty() => n.trim().to_string(),
            _ => return Err("name is required and must be a non-empty string".to_string()),
        };
        let exercises = match body.get("exercises") {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => parse_template_exercises(value)?,
        };
        Ok(Self { name, exercises })
    }
}

impl TemplatePatch {
    pub fn from_value(body: &Value) -> Result<Self, String> {
        let mut patch = Self::default();
        if let Some(n) = body.get("name").and_then(Value::as_str) {
            if !n.trim().is_empty() {
                patch.name = Some(n.trim().to_string());
            }
        }
        if let Some(value) = body.get("exercises") {
            if !value.is_null() {
                patch.exercises = Some(parse_template_exercises(value)?);
            }
        }
        Ok(patch)
    }
}

pub fn parse_template_exercises(value: &Value) -> Result<Vec<TemplateExerciseInput>, String> {
    let items = value
        .as_array()
        .ok_or_else(|| "exercises must be an array".to_string())?;

    let mut parsed = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let exercise_name = match item.get("exercise_name").and_then(Value::as_str) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => {
                return Err(format!(
                    "exercises[{i}]: exercise_name is required and must be a non-empty string"
                ))
            }
        };
        let sets = parse_positive_count(item, "sets", i)?;
        let reps = parse_positive_count(item, "reps", i)?;
        parsed.push(TemplateExerciseInput { exercise_name, sets, reps });
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn name_is_trimmed_and_required() {
        let parsed = NewTemplate::from_value(&json!({ "name": "  Push Day  " })).unwrap();
        assert_eq!(parsed.name, "Push Day");

        let err = NewTemplate::from_value(&json!({ "name": "   " })).unwrap_err();
        assert!(err.contains("name"));
    }

    #[test]
    fn template_exercises_have_no_weight_field() {
        let body = json!({
            "name": "Pull Day",
            "exercises": [{ "exercise_name": "Pull-Up", "sets": 4, "reps": 8 }]
        });
        let parsed = NewTemplate::from_value(&body).unwrap();
        assert_eq!(parsed.exercises.len(), 1);
        assert_eq!(parsed.exercises[0].exercise_name, "Pull-Up");
    }

    #[test]
    fn zero_reps_rejected_with_first_violation() {
        let body = json!({
            "name": "Pull Day",
            "exercises": [
                { "exercise_name": "Pull-Up", "sets": 4, "reps": 8 },
                { "exercise_name": "Barbell Row", "sets": 3, "reps": 0 },
            ]
        });
        let err = NewTemplate::from_value(&body).unwrap_err();
        assert_eq!(err, "exercises[1]: reps must be an integer greater than 0");
    }
}
