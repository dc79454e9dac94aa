use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::database::models::template::{NewTemplate, TemplatePatch};
use crate::database::templates::TemplateStore;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/templates - list the caller's templates, newest first
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let templates = TemplateStore::new(&state.db).list(&user.id).await?;
    Ok(Json(templates))
}

/// POST /api/templates - save a reusable exercise template
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let new = NewTemplate::from_value(&body).map_err(ApiError::bad_request)?;
    let template = TemplateStore::new(&state.db).create(&user.id, new).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// GET /api/templates/:id - fetch one template with exercises
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let template = TemplateStore::new(&state.db).get(&user.id, &id).await?;
    Ok(Json(template))
}

/// PUT /api/templates/:id - rename and/or replace the exercise list
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let patch = TemplatePatch::from_value(&body).map_err(ApiError::bad_request)?;
    let template = TemplateStore::new(&state.db)
        .update(&user.id, &id, patch)
        .await?;
    Ok(Json(template))
}

/// DELETE /api/templates/:id - remove a template and its exercises
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    TemplateStore::new(&state.db).delete(&user.id, &id).await?;
    Ok(Json(json!({ "success": true })))
}
