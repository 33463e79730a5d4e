//! API error types.

use daybook_auth::AuthError;
use daybook_core::errors::{ErrorKind, FieldErrors};
use thiserror::Error;

/// Errors that can occur when calling the Daybook backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or no response arrived.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// HTTP 401 outside the refresh-once path.
    #[error("unauthorized")]
    Unauthorized,

    /// HTTP 4xx with a field-error body.
    #[error("{0}")]
    Validation(FieldErrors),

    /// The referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Session failure, including an expired session.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// Classify a transport failure.
    #[must_use]
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Parse(error.to_string())
        } else {
            Self::Network(error)
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Api { .. } | Self::Parse(_) => ErrorKind::Other,
            Self::Auth(error) => error.kind(),
        }
    }
}
