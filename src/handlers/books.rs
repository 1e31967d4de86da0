use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::AppState;
use crate::error::{ApiError, Result};
use crate::handlers::extractors::ValidatedJson;
use crate::models::{Book, CreateBook, UpdateBook};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookListResponse {
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    pub book: Book,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

/// List all books, ordered by title
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = BookListResponse)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> Result<Json<BookListResponse>> {
    let books = Book::find_all(&state.db).await?;

    Ok(Json(BookListResponse { books }))
}

/// Get a single book by isbn
#[utoipa::path(
    get,
    path = "/books/{isbn}",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "Primary key of the book")
    ),
    responses(
        (status = 200, description = "The requested book", body = BookResponse),
        (status = 404, description = "No book with that isbn")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<BookResponse>> {
    let book = Book::find_one(&state.db, &isbn)
        .await?
        .ok_or_else(|| ApiError::book_not_found(&isbn))?;

    Ok(Json(BookResponse { book }))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Validation error or duplicate isbn")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateBook>,
) -> Result<(StatusCode, Json<BookResponse>)> {
    let book = Book::create(&state.db, &payload).await.map_err(|err| {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return ApiError::BadRequest(format!(
                    "Book with isbn '{}' already exists",
                    payload.isbn
                ));
            }
        }
        ApiError::from(err)
    })?;

    Ok((StatusCode::CREATED, Json(BookResponse { book })))
}

/// Replace every field of an existing book
#[utoipa::path(
    put,
    path = "/books/{isbn}",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "Primary key of the book")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "No book with that isbn")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateBook>,
) -> Result<Json<BookResponse>> {
    let book = Book::update(&state.db, &isbn, &payload)
        .await?
        .ok_or_else(|| ApiError::book_not_found(&isbn))?;

    Ok(Json(BookResponse { book }))
}

/// Delete a book by isbn
#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "Primary key of the book")
    ),
    responses(
        (status = 200, description = "Book deleted", body = DeleteResponse),
        (status = 404, description = "No book with that isbn")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let deleted = Book::remove(&state.db, &isbn).await?;

    if !deleted {
        return Err(ApiError::book_not_found(&isbn));
    }

    Ok(Json(DeleteResponse {
        message: "Book deleted".to_string(),
    }))
}

/// Build the book resource routes
pub fn books_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route(
            "/{isbn}",
            get(get_book).put(update_book).delete(delete_book),
        )
}
