//! OpenAPI documentation aggregation.

use utoipa::OpenApi;

use crate::handlers::{books, health};
use crate::models::{Book, CreateBook, UpdateBook};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
    ),
    components(schemas(
        Book,
        CreateBook,
        UpdateBook,
        books::BookListResponse,
        books::BookResponse,
        books::DeleteResponse,
        health::HealthStatus,
    )),
    tags(
        (name = "books", description = "Book resource CRUD endpoints"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;
