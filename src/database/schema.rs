use sqlx::SqlitePool;

use crate::database::StoreError;

/// Create tables and indexes if they don't exist. Safe to run on every start.
pub async fn initialize(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS workout_sessions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            title TEXT NOT NULL,
            date TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS exercises (
            id TEXT PRIMARY KEY,
            workout_id TEXT NOT NULL,
            exercise_name TEXT NOT NULL,
            weight REAL NOT NULL,
            sets INTEGER NOT NULL,
            reps INTEGER NOT NULL,
            order_index INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (workout_id) REFERENCES workout_sessions(id) ON DELETE CASCADE
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS templates (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS template_exercises (
            id TEXT PRIMARY KEY,
            template_id TEXT NOT NULL,
            exercise_name TEXT NOT NULL,
            sets INTEGER NOT NULL,
            reps INTEGER NOT NULL,
            order_index INTEGER NOT NULL,
            FOREIGN KEY (template_id) REFERENCES templates(id) ON DELETE CASCADE
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS common_exercises (
            exercise_name TEXT PRIMARY KEY
        )
        ",
    )
    .execute(pool)
    .await?;

    for stmt in [
        "CREATE INDEX IF NOT EXISTS idx_exercises_workout_id ON exercises(workout_id)",
        "CREATE INDEX IF NOT EXISTS idx_template_exercises_template_id ON template_exercises(template_id)",
        "CREATE INDEX IF NOT EXISTS idx_workout_sessions_user_date ON workout_sessions(user_id, date)",
        "CREATE INDEX IF NOT EXISTS idx_templates_user ON templates(user_id)",
    ] {
        sqlx::query(stmt).execute(pool).await?;
    }

    Ok(())
}

/// Seed the static exercise reference list. Insert-if-absent, so reseeding
/// on every start is idempotent and user data is never touched.
pub async fn seed_common_exercises(pool: &SqlitePool) -> Result<(), StoreError> {
    for name in COMMON_EXERCISES {
        sqlx::query("INSERT OR IGNORE INTO common_exercises (exercise_name) VALUES ($1)")
            .bind(name)
            .execute(pool)
            .await?;
    }
    Ok(())
}

/// Curated reference list, grouped by muscle group. Read-only at runtime.
pub const COMMON_EXERCISES: &[&str] = &[
    // Chest
    "Bench Press",
    "Incline Bench Press",
    "Decline Bench Press",
    "Dumbbell Bench Press",
    "Incline Dumbbell Press",
    "Dumbbell Fly",
    "Cable Crossover",
    "Chest Dip",
    "Push-Up",
    "Machine Chest Press",
    // Back
    "Deadlift",
    "Pull-Up",
    "Chin-Up",
    "Barbell Row",
    "Dumbbell Row",
    "T-Bar Row",
    "Seated Cable Row",
    "Lat Pulldown",
    "Straight-Arm Pulldown",
    "Rack Pull",
    "Back Extension",
    // Shoulders
    "Overhead Press",
    "Seated Dumbbell Press",
    "Arnold Press",
    "Lateral Raise",
    "Front Raise",
    "Rear Delt Fly",
    "Face Pull",
    "Upright Row",
    "Shrug",
    "Cable Lateral Raise",
    // Biceps
    "Barbell Curl",
    "Dumbbell Curl",
    "Hammer Curl",
    "Incline Dumbbell Curl",
    "Preacher Curl",
    "Concentration Curl",
    "Cable Curl",
    "EZ-Bar Curl",
    // Triceps
    "Close-Grip Bench Press",
    "Skull Crusher",
    "Triceps Pushdown",
    "Overhead Triceps Extension",
    "Triceps Kickback",
    "Bench Dip",
    "Diamond Push-Up",
    // Quads
    "Back Squat",
    "Front Squat",
    "Goblet Squat",
    "Leg Press",
    "Hack Squat",
    "Bulgarian Split Squat",
    "Walking Lunge",
    "Reverse Lunge",
    "Leg Extension",
    "Step-Up",
    // Hamstrings
    "Romanian Deadlift",
    "Stiff-Leg Deadlift",
    "Lying Leg Curl",
    "Seated Leg Curl",
    "Nordic Curl",
    "Good Morning",
    "Single-Leg Romanian Deadlift",
    // Glutes
    "Hip Thrust",
    "Glute Bridge",
    "Cable Pull-Through",
    "Sumo Deadlift",
    "Glute Kickback",
    "Curtsy Lunge",
    "Frog Pump",
    // Calves
    "Standing Calf Raise",
    "Seated Calf Raise",
    "Donkey Calf Raise",
    "Single-Leg Calf Raise",
    // Core
    "Plank",
    "Side Plank",
    "Crunch",
    "Sit-Up",
    "Hanging Leg Raise",
    "Hanging Knee Raise",
    "Cable Crunch",
    "Russian Twist",
    "Ab Wheel Rollout",
    "Dead Bug",
    "Bird Dog",
    "Mountain Climber",
    // Olympic lifts
    "Clean and Jerk",
    "Power Clean",
    "Hang Clean",
    "Snatch",
    "Power Snatch",
    "Clean Pull",
    "Push Press",
    "Split Jerk",
    // Functional movements
    "Kettlebell Swing",
    "Turkish Get-Up",
    "Farmer's Carry",
    "Sled Push",
    "Battle Ropes",
    "Box Jump",
    "Burpee",
    "Wall Ball",
    "Medicine Ball Slam",
    "Rowing Machine",
    "Assault Bike",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_list_has_no_duplicates() {
        let mut names: Vec<&str> = COMMON_EXERCISES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), COMMON_EXERCISES.len());
    }

    #[test]
    fn seed_list_is_roughly_one_hundred_names() {
        assert!(COMMON_EXERCISES.len() >= 90 && COMMON_EXERCISES.len() <= 120);
    }
}
