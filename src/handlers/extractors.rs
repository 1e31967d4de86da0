//! Common extractors for API handlers.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// JSON body extractor enforcing the strict validation policy.
///
/// Deserialization is strict: a missing required field, a wrong type, or a
/// field outside the declared payload rejects the request with 400 and a
/// message list. Field constraints (`validator::Validate`) run on the
/// deserialized value and are reported the same way.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        value.validate().map_err(validation_messages)?;

        Ok(Self(value))
    }
}

/// Flatten `ValidationErrors` into one message per failed constraint.
fn validation_messages(errors: ValidationErrors) -> ApiError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| match &e.message {
                Some(message) => format!("field '{}' {}", field, message),
                None => format!("field '{}' failed the '{}' constraint", field, e.code),
            })
        })
        .collect();

    // Deterministic order for clients and tests
    messages.sort();

    ApiError::Validation(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::CreateBook;

    #[test]
    fn constraint_failures_become_one_message_per_field() {
        let payload: CreateBook = serde_json::from_value(serde_json::json!({
            "isbn": "",
            "amazon_url": "not a url",
            "author": "Elie",
            "language": "english",
            "pages": 100,
            "publisher": "Nothing publishers",
            "title": "my first book",
            "year": 2008
        }))
        .unwrap();

        let err = validation_messages(payload.validate().unwrap_err());
        match err {
            ApiError::Validation(messages) => {
                assert_eq!(messages.len(), 2);
                assert!(messages.iter().any(|m| m.contains("isbn")));
                assert!(messages.iter().any(|m| m.contains("amazon_url")));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
