use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkoutSession {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub date: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exercise {
    pub id: String,
    pub workout_id: String,
    pub exercise_name: String,
    pub weight: f64,
    pub sets: i64,
    pub reps: i64,
    pub order_index: i64,
    pub created_at: String,
}

/// A workout session with its child exercises, ordered by `order_index`.
/// This is the wire shape for every workout response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutWithExercises {
    #[serde(flatten)]
    pub session: WorkoutSession,
    pub exercises: Vec<Exercise>,
}

/// Validated exercise payload for create/replace writes
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseInput {
    pub exercise_name: String,
    pub weight: f64,
    pub sets: i64,
    pub reps: i64,
}

/// Validated body for POST /api/workouts
#[derive(Debug, Clone)]
pub struct NewWorkout {
    pub title: String,
    pub date: String,
    pub exercises: Vec<ExerciseInput>,
}

/// Validated body for PUT /api/workouts/:id. Absent fields are left alone;
/// a supplied exercise list fully replaces the existing one.
#[derive(Debug, Clone, Default)]
pub struct WorkoutPatch {
    pub title: Option<String>,
    pub date: Option<String>,
    pub exercises: Option<Vec<ExerciseInput>>,
}

impl NewWorkout {
    /// Parse and validate, reporting the first violation.
    pub fn from_value(body: &Value) -> Result<Self, String> {
        let title = match body.get("title").and_then(Value::as_str) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => return Err("title is required and must be a non-empty string".to_string()),
        };
        let date = match body.get("date").and_then(Value::as_str) {
            Some(d) => d.to_string(),
            None => return Err("date is required and must be a string".to_string()),
        };
        let exercises = match body.get("exercises") {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => parse_exercises(value)?,
        };
        Ok(Self { title, date, exercises })
    }
}

impl WorkoutPatch {
    pub fn from_value(body: &Value) -> Result<Self, String> {
        let mut patch = Self::default();
        if let Some(t) = body.get("title").and_then(Value::as_str) {
            if !t.is_empty() {
                patch.title = Some(t.to_string());
            }
        }
        if let Some(d) = body.get("date").and_then(Value::as_str) {
            if !d.is_empty() {
                patch.date = Some(d.to_string());
            }
        }
        if let Some(value) = body.get("exercises") {
            if !value.is_null() {
                patch.exercises = Some(parse_exercises(value)?);
            }
        }
        Ok(patch)
    }
}

/// Validate an exercise array for a workout: every item needs a non-empty
/// name, weight >= 0, sets > 0, reps > 0.
pub fn parse_exercises(value: &Value) -> Result<Vec<ExerciseInput>, String> {
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
        let weight = match item.get("weight").and_then(Value::as_f64) {
            Some(w) if w >= 0.0 => w,
            _ => {
                return Err(format!(
                    "exercises[{i}]: weight must be a number greater than or equal to 0"
                ))
            }
        };
        let sets = parse_positive_count(item, "sets", i)?;
        let reps = parse_positive_count(item, "reps", i)?;
        parsed.push(ExerciseInput { exercise_name, weight, sets, reps });
    }
    Ok(parsed)
}

pub(crate) fn parse_positive_count(item: &Value, field: &str, index: usize) -> Result<i64, String> {
    match item.get(field).and_then(Value::as_i64) {
        Some(n) if n > 0 => Ok(n),
        _ => Err(format!(
            "exercises[{index}]: {field} must be an integer greater than 0"
        )),
    }
}
