use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::template::{
    NewTemplate, Template, TemplateExercise, TemplateExerciseInput, TemplatePatch,
    TemplateWithExercises,
};
use crate::database::{Database, StoreError};

/// Template store. Same ownership and full-replace semantics as workouts;
/// template exercises carry no weight.
pub struct TemplateStore {
    pool: SqlitePool,
}

impl TemplateStore {
    pub fn new(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<TemplateWithExercises>, StoreError> {
        let templates: Vec<Template> =
            sqlx::query_as("SELECT * FROM templates WHERE user_id = $1 ORDER BY created_at DESC")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        let mut out = Vec::with_capacity(templates.len());
        for template in templates {
            let exercises = self.exercises_for(&template.id).await?;
            out.push(TemplateWithExercises { template, exercises });
        }
        Ok(out)
    }

    pub async fn create(
        &self,
        user_id: &str,
        new: NewTemplate,
    ) -> Result<TemplateWithExercises, StoreError> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO templates (id, user_id, name, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(&id)
        .bind(user_id)
        .bind(&new.name)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        insert_template_exercises(&mut tx, &id, &new.exercises).await?;

        tx.commit().await?;

        self.get(user_id, &id).await
    }

    pub async fn get(&self, user_id: &str, id: &str) -> Result<TemplateWithExercises, StoreError> {
        let template: Template =
            sqlx::query_as("SELECT * FROM templates WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| StoreError::NotFound("Template not found".to_string()))?;

        let exercises = self.exercises_for(&template.id).await?;
        Ok(TemplateWithExercises { template, exercises })
    }

    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        patch: TemplatePatch,
    ) -> Result<TemplateWithExercises, StoreError> {
        let mut tx = self.pool.begin().await?;

        owned_template_exists(&mut tx, id, user_id).await?;

        if let Some(name) = &patch.name {
            sqlx::query("UPDATE templates SET name = $1 WHERE id = $2")
                .bind(name)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        if let Some(exercises) = &patch.exercises {
            sqlx::query("DELETE FROM template_exercises WHERE template_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            insert_template_exercises(&mut tx, id, exercises).await?;
        }

        tx.commit().await?;

        self.get(user_id, id).await
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        owned_template_exists(&mut tx, id, user_id).await?;

        sqlx::query("DELETE FROM template_exercises WHERE template_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM templates WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn exercises_for(&self, template_id: &str) -> Result<Vec<TemplateExercise>, StoreError> {
        let exercises = sqlx::query_as(
            "SELECT * FROM template_exercises WHERE template_id = $1 ORDER BY order_index ASC",
        )
        .bind(template_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(exercises)
    }
}

async fn owned_template_exists(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    id: &str,
    user_id: &str,
) -> Result<(), StoreError> {
    let found: Option<(String,)> =
        sqlx::query_as("SELECT id FROM templates WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await?;
    match found {
        Some(_) => Ok(()),
        None => Err(StoreError::NotFound("Template not found".to_string())),
    }
}

async fn insert_template_exercises(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    template_id: &str,
    exercises: &[TemplateExerciseInput],
) -> Result<(), StoreError> {
    for (index, exercise) in exercises.iter().enumerate() {
        sqlx::query(
            "INSERT INTO template_exercises \
             (id, template_id, exercise_name, sets, reps, order_index) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(template_id)
        .bind(&exercise.exercise_name)
        .bind(exercise.sets)
        .bind(exercise.reps)
        .bind(index as i64)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
