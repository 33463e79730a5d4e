use daybook_core::errors::{CoreError, ErrorKind, FieldErrors};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the email/password pair.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The request could not be sent or no response arrived.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// HTTP 401 from the backend.
    #[error("unauthorized")]
    Unauthorized,

    /// The access token was rejected and the refresh-once policy failed.
    #[error("session expired; run `dbk auth login`")]
    SessionExpired,

    #[error("not logged in; run `dbk auth login`")]
    NotAuthenticated,

    /// HTTP 4xx with a field-error body.
    #[error("{0}")]
    Validation(FieldErrors),

    #[error("token store error: {0}")]
    TokenStore(String),

    /// A status or body the auth endpoints should never produce.
    #[error("unexpected response ({status}): {message}")]
    UnexpectedResponse { status: u16, message: String },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("{0}")]
    Other(String),
}

impl AuthError {
    /// Classify a transport failure. Body decoding failures are not network
    /// errors.
    #[must_use]
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::UnexpectedResponse {
                status: error.status().map_or(0, |status| status.as_u16()),
                message: error.to_string(),
            }
        } else {
            Self::Network(error)
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Unauthorized | Self::SessionExpired | Self::NotAuthenticated => {
                ErrorKind::Unauthorized
            }
            Self::InvalidCredentials(_) | Self::Validation(_) => ErrorKind::Validation,
            Self::UnexpectedResponse { status: 404, .. } => ErrorKind::NotFound,
            Self::Core(error) => error.kind(),
            Self::UnexpectedResponse { .. } | Self::TokenStore(_) | Self::Other(_) => {
                ErrorKind::Other
            }
        }
    }

    /// Whether the backend positively refused the tokens or credentials, as
    /// opposed to being unreachable.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized
                | Self::SessionExpired
                | Self::InvalidCredentials(_)
                | Self::Validation(_)
        )
    }
}
