pub mod exercise_search;
pub mod manager;
pub mod models;
pub mod schema;
pub mod templates;
pub mod workouts;

pub use manager::Database;

use thiserror::Error;

/// Errors from the record stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
