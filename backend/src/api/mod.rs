//! HTTP surface for catalog list endpoints
//!
//! Each list endpoint accepts `filterBy` and `sortBy` query parameters,
//! compiles them against the entity's schema and runs one parameterized query.
//! Compile errors are answered with 422 before the database is touched.

pub mod catalog;
pub mod error;
pub mod health;

use axum::Router;
use sqlx::SqlitePool;

pub use error::{ErrorResponse, ServiceError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
}

/// All routes, ready to be served.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(catalog::router())
        .with_state(state)
}
