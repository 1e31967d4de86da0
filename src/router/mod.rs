//! Router configuration module.

use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::handlers::{books, health};
use crate::openapi::ApiDoc;

/// Build the application router.
pub fn build_router(app_state: AppState) -> Router {
    let request_timeout = std::time::Duration::from_secs(app_state.config.request_timeout_secs);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/books", books::books_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    axum::http::StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}

/// JSON body for requests that match no route.
async fn not_found() -> ApiError {
    ApiError::NotFound("Resource not found".to_string())
}
