use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

use crate::db::StoreError;

/// Failure kinds an operation can end with. Each maps to the message the
/// caller sees in the envelope; `Upstream` keeps its detail for the logs only.
#[derive(Debug, PartialEq)]
pub enum AppError {
    Unauthorized,
    InvalidCredentials,
    Validation(String),
    NotFound(String),
    Conflict(String),
    Upstream(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
}

impl AppError {
    /// Message surfaced to the caller.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::Validation(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => msg.clone(),
            AppError::Upstream(_) => "Internal server error".to_string(),
        }
    }

    /// Logs the failure at a level matching its kind and returns the public message.
    pub fn report(&self, operation: &str) -> String {
        match self {
            AppError::Upstream(detail) => log::error!("{} failed: {}", operation, detail),
            AppError::InvalidCredentials => log::warn!("{} rejected: invalid credentials", operation),
            other => log::debug!("{} rejected: {}", operation, other),
        }
        self.public_message()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::Validation(msg) => write!(f, "Validation: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Upstream(msg) => write!(f, "Upstream: {}", msg),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey => AppError::Conflict("Duplicate key".to_string()),
            StoreError::Backend(detail) => AppError::Upstream(detail),
        }
    }
}

// Only raised for requests that never make it into the pipeline, which are
// always malformed input. Pipeline failures travel inside a 200 envelope.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(ErrorResponse { success: false, message: self.public_message() })
    }
}
