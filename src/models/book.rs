use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;
use validator::Validate;

/// A row in the `books` table. The isbn is the primary key; no two rows
/// share one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Book {
    #[schema(example = "0691161518")]
    pub isbn: String,
    #[schema(example = "http://a.co/eobPtX2")]
    pub amazon_url: String,
    #[schema(example = "Matthew Lane")]
    pub author: String,
    #[schema(example = "english")]
    pub language: String,
    #[schema(example = 264)]
    pub pages: i32,
    #[schema(example = "Princeton University Press")]
    pub publisher: String,
    #[schema(example = "Power-Up: Unlocking the Hidden Mathematics in Video Games")]
    pub title: String,
    #[schema(example = 2017)]
    pub year: i32,
}

/// Payload for POST /books. Every field is required and unknown fields are
/// rejected outright.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateBook {
    #[validate(length(min = 1))]
    pub isbn: String,

    #[validate(url)]
    pub amazon_url: String,

    #[validate(length(min = 1))]
    pub author: String,

    #[validate(length(min = 1))]
    pub language: String,

    #[validate(range(min = 1))]
    pub pages: i32,

    #[validate(length(min = 1))]
    pub publisher: String,

    #[validate(length(min = 1))]
    pub title: String,

    #[validate(range(min = 0, max = 9999))]
    pub year: i32,
}

/// Payload for PUT /books/{isbn}. The isbn comes from the path and may not
/// appear in the body; all other fields are replaced in full.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateBook {
    #[validate(url)]
    pub amazon_url: String,

    #[validate(length(min = 1))]
    pub author: String,

    #[validate(length(min = 1))]
    pub language: String,

    #[validate(range(min = 1))]
    pub pages: i32,

    #[validate(length(min = 1))]
    pub publisher: String,

    #[validate(length(min = 1))]
    pub title: String,

    #[validate(range(min = 0, max = 9999))]
    pub year: i32,
}

impl Book {
    /// All books, ordered by title.
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Book>, sqlx::Error> {
        sqlx::query_as::<_, Book>(
            "SELECT isbn, amazon_url, author, language, pages, publisher, title, year
             FROM books
             ORDER BY title",
        )
        .fetch_all(pool)
        .await
    }

    /// Single book by exact isbn match; `None` when absent.
    pub async fn find_one(pool: &PgPool, isbn: &str) -> Result<Option<Book>, sqlx::Error> {
        sqlx::query_as::<_, Book>(
            "SELECT isbn, amazon_url, author, language, pages, publisher, title, year
             FROM books
             WHERE isbn = $1",
        )
        .bind(isbn)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(pool: &PgPool, payload: &CreateBook) -> Result<Book, sqlx::Error> {
        sqlx::query_as::<_, Book>(
            "INSERT INTO books (isbn, amazon_url, author, language, pages, publisher, title, year)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING isbn, amazon_url, author, language, pages, publisher, title, year",
        )
        .bind(&payload.isbn)
        .bind(&payload.amazon_url)
        .bind(&payload.author)
        .bind(&payload.language)
        .bind(payload.pages)
        .bind(&payload.publisher)
        .bind(&payload.title)
        .bind(payload.year)
        .fetch_one(pool)
        .await
    }

    /// Replace every data field of the row with the given isbn; `None` when
    /// no row matched.
    pub async fn update(
        pool: &PgPool,
        isbn: &str,
        payload: &UpdateBook,
    ) -> Result<Option<Book>, sqlx::Error> {
        sqlx::query_as::<_, Book>(
            "UPDATE books
             SET amazon_url = $1, author = $2, language = $3, pages = $4,
                 publisher = $5, title = $6, year = $7
             WHERE isbn = $8
             RETURNING isbn, amazon_url, author, language, pages, publisher, title, year",
        )
        .bind(&payload.amazon_url)
        .bind(&payload.author)
        .bind(&payload.language)
        .bind(payload.pages)
        .bind(&payload.publisher)
        .bind(&payload.title)
        .bind(payload.year)
        .bind(isbn)
        .fetch_optional(pool)
        .await
    }

    /// Returns true if the book existed and was deleted, false otherwise.
    pub async fn remove(pool: &PgPool, isbn: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = $1")
            .bind(isbn)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
