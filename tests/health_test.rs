//! Integration tests for the health endpoint and router fallbacks.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn health_reports_healthy_with_reachable_database(pool: PgPool) {
    let app = common::build_test_app(pool);

    let (status, body) = common::send(app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "healthy");
    assert!(body["version"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn unknown_route_returns_json_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let (status, body) = common::send(app, "GET", "/no-such-route", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["status"], 404);
}
