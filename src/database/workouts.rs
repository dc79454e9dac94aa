use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::workout::{
    Exercise, ExerciseInput, NewWorkout, WorkoutPatch, WorkoutSession, WorkoutWithExercises,
};
use crate::database::{Database, StoreError};

/// Workout session store. Every query is scoped by the caller's user id, so
/// another user's rows are indistinguishable from absent ones.
pub struct WorkoutStore {
    pool: SqlitePool,
}

impl WorkoutStore {
    pub fn new(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }

    /// List the user's sessions, newest first, with exercises attached in
    /// display order. An exact date string filter narrows the result.
    pub async fn list(
        &self,
        user_id: &str,
        date: Option<&str>,
    ) -> Result<Vec<WorkoutWithExercises>, StoreError> {
        let sessions: Vec<WorkoutSession> = match date {
            Some(date) => {
                sqlx::query_as(
                    "SELECT * FROM workout_sessions WHERE user_id = $1 AND date = $2 \
                     ORDER BY created_at DESC",
                )
                .bind(user_id)
                .bind(date)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(
                    "SELECT * FROM workout_sessions WHERE user_id = $1 ORDER BY created_at DESC",
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        let mut out = Vec::with_capacity(sessions.len());
        for session in sessions {
            let exercises = self.exercises_for(&session.id).await?;
            out.push(WorkoutWithExercises { session, exercises });
        }
        Ok(out)
    }

    /// Create a session and its exercises as one unit. If any child insert
    /// fails the whole creation rolls back.
    pub async fn create(
        &self,
        user_id: &str,
        new: NewWorkout,
    ) -> Result<WorkoutWithExercises, StoreError> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO workout_sessions (id, user_id, title, date, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&id)
        .bind(user_id)
        .bind(&new.title)
        .bind(&new.date)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        insert_exercises(&mut tx, &id, &new.exercises, &now).await?;

        tx.commit().await?;

        self.get(user_id, &id).await
    }

    /// Fetch one session with exercises; absent or not owned is NotFound.
    pub async fn get(&self, user_id: &str, id: &str) -> Result<WorkoutWithExercises, StoreError> {
        let session: WorkoutSession =
            sqlx::query_as("SELECT * FROM workout_sessions WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| StoreError::NotFound("Workout not found".to_string()))?;

        let exercises = self.exercises_for(&session.id).await?;
        Ok(WorkoutWithExercises { session, exercises })
    }

    /// Update supplied scalar fields; a supplied exercise list fully replaces
    /// the previous one with fresh ids and re-sequenced order_index.
    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        patch: WorkoutPatch,
    ) -> Result<WorkoutWithExercises, StoreError> {
        let mut tx = self.pool.begin().await?;

        owned_session_exists(&mut tx, id, user_id).await?;

        if let Some(title) = &patch.title {
            sqlx::query("UPDATE workout_sessions SET title = $1 WHERE id = $2")
                .bind(title)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
        if let Some(date) = &patch.date {
            sqlx::query("UPDATE workout_sessions SET date = $1 WHERE id = $2")
                .bind(date)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        if let Some(exercises) = &patch.exercises {
            sqlx::query("DELETE FROM exercises WHERE workout_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            let now = Utc::now().to_rfc3339();
            insert_exercises(&mut tx, id, exercises, &now).await?;
        }

        tx.commit().await?;

        self.get(user_id, id).await
    }

    /// Delete children then parent, explicitly rather than through the FK
    /// cascade, so delete order does not depend on the storage engine.
    pub async fn delete(&self, user_id: &str, id: &str) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        owned_session_exists(&mut tx, id, user_id).await?;

        sqlx::query("DELETE FROM exercises WHERE workout_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM workout_sessions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn exercises_for(&self, workout_id: &str) -> Result<Vec<Exercise>, StoreError> {
        let exercises = sqlx::query_as(
            "SELECT * FROM exercises WHERE workout_id = $1 ORDER BY order_index ASC",
        )
        .bind(workout_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(exercises)
    }
}

async fn owned_session_exists(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    id: &str,
    user_id: &str,
) -> Result<(), StoreError> {
    let found: Option<(String,)> =
        sqlx::query_as("SELECT id FROM workout_sessions WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await?;
    match found {
        Some(_) => Ok(()),
        None => Err(StoreError::NotFound("Workout not found".to_string())),
    }
}

/// Insert a child list with sequential zero-based order_index, inside the
/// caller's transaction.
async fn insert_exercises(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    workout_id: &str,
    exercises: &[ExerciseInput],
    now: &str,
) -> Result<(), StoreError> {
    for (index, exercise) in exercises.iter().enumerate() {
        sqlx::query(
            "INSERT INTO exercises \
             (id, workout_id, exercise_name, weight, sets, reps, order_index, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(workout_id)
        .bind(&exercise.exercise_name)
        .bind(exercise.weight)
        .bind(exercise.sets)
        .bind(exercise.reps)
        .bind(index as i64)
        .bind(now)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
