use std::sync::Arc;

use crate::auth::Authenticator;
use crate::database::Database;

/// Shared application state, constructed once in main and injected into
/// every handler through axum's router state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub auth: Arc<Authenticator>,
}

impl AppState {
    pub fn new(db: Database, auth: Authenticator) -> Self {
        Self { db, auth: Arc::new(auth) }
    }
}
