//! Custom error types for the vacation service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Business-rule violations raised by the validation layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid role_id: 2 is not allowed. Use role_id 1 instead.")]
    InvalidRole,

    #[error("Invalid email format provided.")]
    InvalidFormat,

    #[error("Password is too short; it must be at least 4 characters long.")]
    WeakCredential,

    #[error("The email provided already exists in the system.")]
    DuplicateEmail,

    #[error("{0} is required.")]
    MissingField(&'static str),

    #[error("Price cannot be negative or more than 10000.")]
    OutOfRange,

    #[error("Arrival date cannot be later than departure date.")]
    DateOrder,

    #[error("A vacation with these arrival and departure dates already exists.")]
    DuplicateDateRange,

    #[error("Country {0} does not exist.")]
    UnknownCountry(i32),
}

/// Error type returned by handlers and the authorization gate
#[derive(Error, Debug)]
pub enum ApiError {
    /// Business-rule violation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No authenticated session
    #[error("Unauthorized access")]
    Unauthorized,

    /// Authenticated, but not allowed to perform the operation
    #[error("This operation requires an administrator account")]
    Forbidden,

    /// Identifier does not resolve to a record
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Supplied password does not match the stored hash
    #[error("Incorrect password")]
    BadCredential,

    /// Request body could not be read
    #[error("{0}")]
    BadRequest(String),

    /// Persistence or infrastructure fault
    #[error("Something went wrong. Please try again.")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized | ApiError::BadCredential => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the caller; internal details are only logged
    pub fn user_message(&self) -> String {
        if let ApiError::Internal(source) = self {
            error!("Internal error: {:#}", source);
        }
        self.to_string()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "success": false,
            "message": self.user_message(),
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
