use sqlx::SqlitePool;

use crate::database::{Database, StoreError};

/// Names the merged autocomplete result may grow to before truncation.
const MAX_RESULTS: usize = 50;

/// Exercise-name autocomplete over two sources: the caller's own workout
/// history and the seeded reference list.
pub struct ExerciseSearch {
    pool: SqlitePool,
}

impl ExerciseSearch {
    pub fn new(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }

    /// Case-insensitive substring search. The caller's own history is listed
    /// first; reference names are appended; duplicates collapse to the user's
    /// entry. Capped at 50 names after the merge.
    ///
    /// Callers must short-circuit empty queries themselves; this always hits
    /// the database.
    pub async fn search(&self, user_id: &str, query: &str) -> Result<Vec<String>, StoreError> {
        let pattern = format!("%{}%", escape_like(query));

        // Ownership of history rows flows through the parent session.
        let user_names: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT e.exercise_name FROM exercises e \
             JOIN workout_sessions w ON w.id = e.workout_id \
             WHERE w.user_id = $1 AND LOWER(e.exercise_name) LIKE LOWER($2) ESCAPE '\\' \
             ORDER BY e.exercise_name ASC",
        )
        .bind(user_id)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        let common_names: Vec<(String,)> = sqlx::query_as(
            "SELECT exercise_name FROM common_exercises \
             WHERE LOWER(exercise_name) LIKE LOWER($1) ESCAPE '\\' \
             ORDER BY exercise_name ASC",
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(merge_results(
            user_names.into_iter().map(|r| r.0),
            common_names.into_iter().map(|r| r.0),
        ))
    }
}

/// Escape LIKE metacharacters so the query matches as a literal substring.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Union the two alphabetical lists, history first. Dedup is
/// case-insensitive and first-in wins, so a name the user has logged keeps
/// their casing and the earlier position. No re-sort after the merge.
fn merge_results(
    user_names: impl Iterator<Item = String>,
    common_names: impl Iterator<Item = String>,
) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut results = Vec::new();

    for name in user_names.chain(common_names) {
        if results.len() >= MAX_RESULTS {
            break;
        }
        if seen.insert(name.to_lowercase()) {
            results.push(name);
        }
    }

    results
}
