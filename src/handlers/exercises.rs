use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
    Extension,
};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::database::exercise_search::ExerciseSearch;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// GET /api/exercises/search?q=text - autocomplete over the caller's
/// history plus the reference list, capped at 50 names
pub async fn search(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let q = query.q.unwrap_or_default();

    // Empty query short-circuits without a database call
    if q.is_empty() {
        return Ok(Json(Vec::<String>::new()));
    }

    let results = ExerciseSearch::new(&state.db).search(&user.id, &q).await?;
    Ok(Json(results))
}
