pub mod app_state;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod router;

pub use app_state::AppState;
pub use config::Config;
pub use error::ApiError;
