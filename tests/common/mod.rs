//! Shared helpers for integration tests.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use bookshelf_api::{AppState, Config, router};

pub fn build_test_app(pool: PgPool) -> Router {
    let config = Config {
        environment: "test".to_string(),
        port: 0,
        database_url: String::new(),
        database_max_connections: 5,
        request_timeout_secs: 30,
    };

    router::build_router(AppState { db: pool, config })
}

/// Insert the fixture row most tests start from (isbn "123432122", author "Elie").
pub async fn seed_book(pool: &PgPool) {
    sqlx::query(
        "INSERT INTO books (isbn, amazon_url, author, language, pages, publisher, title, year)
         VALUES ('123432122', 'https://amazon.com/taco', 'Elie', 'English', 100,
                 'Nothing publishers', 'my first book', 2008)",
    )
    .execute(pool)
    .await
    .expect("failed to seed fixture book");
}

pub async fn count_books(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(pool)
        .await
        .expect("failed to count books")
}

/// Send one request through the router and decode the JSON response body.
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is not JSON")
    };

    (status, json)
}
