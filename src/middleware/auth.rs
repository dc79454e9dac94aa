use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Authentication middleware: resolves the caller's user id and injects it
/// as an `AuthUser` extension. An unauthenticated request short-circuits
/// here with a 401 and never reaches a handler.
pub async fn require_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user_id = state.auth.resolve_user_id(&headers).await?;
    request.extensions_mut().insert(AuthUser { id: user_id });
    Ok(next.run(request).await)
}
