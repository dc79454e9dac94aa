use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::database::models::workout::{NewWorkout, WorkoutPatch};
use crate::database::workouts::WorkoutStore;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Exact match on the stored ISO day string (YYYY-MM-DD)
    pub date: Option<String>,
}

/// GET /api/workouts - list the caller's sessions, newest first
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let workouts = WorkoutStore::new(&state.db)
        .list(&user.id, query.date.as_deref())
        .await?;
    Ok(Json(workouts))
}

/// POST /api/workouts - log a new session with its exercises
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let new = NewWorkout::from_value(&body).map_err(ApiError::bad_request)?;
    let workout = WorkoutStore::new(&state.db).create(&user.id, new).await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

/// GET /api/workouts/:id - fetch one session with exercises
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let workout = WorkoutStore::new(&state.db).get(&user.id, &id).await?;
    Ok(Json(workout))
}

/// PUT /api/workouts/:id - update scalar fields and/or replace the
/// exercise list
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let patch = WorkoutPatch::from_value(&body).map_err(ApiError::bad_request)?;
    let workout = WorkoutStore::new(&state.db)
        .update(&user.id, &id, patch)
        .await?;
    Ok(Json(workout))
}

/// DELETE /api/workouts/:id - remove a session and its exercises
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    WorkoutStore::new(&state.db).delete(&user.id, &id).await?;
    Ok(Json(json!({ "success": true })))
}
