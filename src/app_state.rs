//! Application state shared across all handlers.

use crate::config::Config;

/// Application state shared across handlers.
///
/// The pool is passed in at construction; handlers never reach for a
/// process-wide connection.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub db: sqlx::PgPool,
    /// Application configuration
    pub config: Config,
}
