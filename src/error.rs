use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request validation failed")]
    Validation(Vec<String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Structured error response: `{"error": {"message", "status", ["errors"]}}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub status: u16,
    /// Per-field messages, present on validation failures only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ApiError {
    /// Helper: no row for the given isbn
    pub fn book_not_found(isbn: &str) -> Self {
        ApiError::NotFound(format!("There is no book with an isbn '{}'", isbn))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            // Database details stay out of client responses
            ApiError::Database(_) | ApiError::Internal(_) => {
                "An internal server error occurred".to_string()
            }
            ApiError::Validation(_) => "Request validation failed".to_string(),
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => msg.clone(),
        }
    }

    fn validation_errors(&self) -> Option<Vec<String>> {
        match self {
            ApiError::Validation(errors) => Some(errors.clone()),
            _ => None,
        }
    }

    fn log_error(&self) {
        match self.status_code() {
            status if status.is_server_error() => {
                error!(error = %self, "Server error occurred");
            }
            status if status.is_client_error() => {
                warn!(error = %self, "Client error occurred");
            }
            _ => {}
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        self.log_error();

        let body = ErrorResponse {
            error: ErrorDetail {
                message: self.message(),
                status: status.as_u16(),
                errors: self.validation_errors(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                ApiError::Validation(vec![data_error_message(&err.body_text())])
            }
            JsonRejection::JsonSyntaxError(_) => {
                ApiError::BadRequest("Invalid JSON in request body".to_string())
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::BadRequest("JSON content type required".to_string())
            }
            _ => ApiError::BadRequest("Invalid request body".to_string()),
        }
    }
}

/// Convert a serde deserialization message into a per-field validation message.
///
/// Strict deserialization surfaces unknown and missing fields as data errors;
/// the raw serde text is rephrased so clients see which field to fix.
fn data_error_message(text: &str) -> String {
    if let Some(field) = field_in(text, "unknown field `") {
        format!("field '{}' is not permitted", field)
    } else if let Some(field) = field_in(text, "missing field `") {
        format!("field '{}' is required", field)
    } else if text.contains("invalid type") {
        "invalid data type in request body".to_string()
    } else {
        "invalid request body".to_string()
    }
}

/// Extract the backticked field name following `prefix`, e.g. from
/// "unknown field `EXTRA`, expected one of ..."
fn field_in(text: &str, prefix: &str) -> Option<String> {
    let start = text.find(prefix)? + prefix.len();
    let end = text[start..].find('`')?;
    Some(text[start..start + end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_bad_request() {
        let err = ApiError::Validation(vec!["field 'author' is required".to_string()]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.validation_errors(),
            Some(vec!["field 'author' is required".to_string()])
        );
    }

    #[test]
    fn not_found_maps_to_404_with_isbn_in_message() {
        let err = ApiError::book_not_found("123432122");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "There is no book with an isbn '123432122'");
    }

    #[test]
    fn database_errors_hide_details_from_clients() {
        let err = ApiError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "An internal server error occurred");
    }

    #[test]
    fn unknown_field_message_names_the_field() {
        let msg = data_error_message(
            "Failed to deserialize the JSON body into the target type: \
             unknown field `EXTRA`, expected one of `isbn`, `title`",
        );
        assert_eq!(msg, "field 'EXTRA' is not permitted");
    }

    #[test]
    fn missing_field_message_names_the_field() {
        let msg = data_error_message(
            "Failed to deserialize the JSON body into the target type: \
             missing field `author` at line 1 column 24",
        );
        assert_eq!(msg, "field 'author' is required");
    }
}
