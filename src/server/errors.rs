//! Errors surfaced to API callers.
//!
//! Model code returns `anyhow::Result`; [`ApiError::from`] is the one place
//! where those internal errors are matched to safe user-facing responses.
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use derive_more::Display;
use serde_json::json;

use crate::utils::validation::FieldErrors;

/// Prefix `SQLite` puts in front of a unique constraint failure.
const UNIQUE_FAILED_PREFIX: &str = "UNIQUE constraint failed: ";

/// Error response of an API request.
#[derive(Debug, Display)]
pub enum ApiError {
    /// No record matches the requested identifier.
    #[display(fmt = "Not found.")]
    NotFound,
    /// The request body broke one or more field constraints.
    #[display(fmt = "Invalid input.")]
    Validation(FieldErrors),
    /// The request could not be understood at all, e.g. malformed JSON.
    #[display(fmt = "{}", _0)]
    BadRequest(String),
    /// Anything else. Details are logged, never returned.
    #[display(fmt = "A server error occurred.")]
    Internal,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match *self {
            Self::Validation(ref errors) => response.json(errors),
            Self::NotFound | Self::BadRequest(_) | Self::Internal => {
                response.json(json!({ "detail": self.to_string() }))
            }
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<anyhow::Error> for ApiError {
    #[expect(clippy::wildcard_enum_match_arm, reason = "Allows _ for enum matching")]
    fn from(error: anyhow::Error) -> Self {
        if let Some(sqlx_error) = error.downcast_ref::<sqlx::Error>() {
            match *sqlx_error {
                sqlx::Error::RowNotFound => return Self::NotFound,
                sqlx::Error::Database(ref db_error) => {
                    if db_error.is_unique_violation() {
                        return Self::Validation(unique_violation(db_error.message()));
                    }
                    if db_error.is_foreign_key_violation() {
                        return Self::Validation(FieldErrors::single(
                            "professor",
                            "Invalid pk - object does not exist.",
                        ));
                    }
                    if db_error.is_check_violation() {
                        return Self::Validation(FieldErrors::single(
                            "non_field_errors",
                            db_error.message(),
                        ));
                    }
                }
                _ => {}
            }
        }
        tracing::error!("{error:?}");
        Self::Internal
    }
}

/// Turn `UNIQUE constraint failed: student.email` into
/// `{"email": ["student with this email already exists."]}`.
fn unique_violation(message: &str) -> FieldErrors {
    let column = message
        .strip_prefix(UNIQUE_FAILED_PREFIX)
        .and_then(|columns| columns.split(", ").next())
        .and_then(|column| column.split_once('.'));
    match column {
        Some((table, field)) => FieldErrors::single(
            field,
            format!(
                "{table} with this {} already exists.",
                field.replace('_', " ")
            ),
        ),
        None => FieldErrors::single("non_field_errors", message),
    }
}
