//! Settling a fetch into what a screen renders.
//!
//! Every data-bearing command ends in one of three states: loaded, empty, or
//! failed with an inline message. Only an unauthorized outcome escapes, since
//! by then the session has already been signed out and the command cannot
//! continue.

use daybook_core::errors::ErrorKind;
use serde::Serialize;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Loadable<T> {
    Loaded(T),
    /// Nothing to show; the message says why.
    Empty(String),
    Failed { kind: ErrorKind, message: String },
}

impl<T> Loadable<T> {
    /// Settle a single-value fetch. `not_found` becomes [`Loadable::Empty`].
    ///
    /// # Errors
    ///
    /// Unauthorized failures are returned as they are.
    pub fn settle(result: Result<T, ApiError>) -> Result<Self, ApiError> {
        match result {
            Ok(value) => Ok(Self::Loaded(value)),
            Err(error) => Self::from_error(error),
        }
    }

    /// Settle a fetch whose absence is a normal answer.
    ///
    /// # Errors
    ///
    /// Unauthorized failures are returned as they are.
    pub fn settle_optional(
        result: Result<Option<T>, ApiError>,
        empty_message: &str,
    ) -> Result<Self, ApiError> {
        match result {
            Ok(Some(value)) => Ok(Self::Loaded(value)),
            Ok(None) => Ok(Self::Empty(empty_message.to_string())),
            Err(error) => Self::from_error(error),
        }
    }

    fn from_error(error: ApiError) -> Result<Self, ApiError> {
        match error.kind() {
            ErrorKind::Unauthorized => Err(error),
            ErrorKind::NotFound => Ok(Self::Empty(match error {
                ApiError::NotFound(message) => message,
                other => other.to_string(),
            })),
            kind => {
                tracing::debug!(%error, %kind, "fetch failed");
                Ok(Self::Failed {
                    kind,
                    message: error.to_string(),
                })
            }
        }
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    #[must_use]
    pub fn loaded(self) -> Option<T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Empty(_) | Self::Failed { .. } => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loadable<U> {
        match self {
            Self::Loaded(value) => Loadable::Loaded(f(value)),
            Self::Empty(message) => Loadable::Empty(message),
            Self::Failed { kind, message } => Loadable::Failed { kind, message },
        }
    }
}

impl<T> Loadable<Vec<T>> {
    /// Settle a list fetch. An empty list becomes [`Loadable::Empty`].
    ///
    /// # Errors
    ///
    /// Unauthorized failures are returned as they are.
    pub fn settle_list(
        result: Result<Vec<T>, ApiError>,
        empty_message: &str,
    ) -> Result<Self, ApiError> {
        match result {
            Ok(items) if items.is_empty() => Ok(Self::Empty(empty_message.to_string())),
            other => Self::settle(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use daybook_auth::AuthError;
    use daybook_core::errors::FieldErrors;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn values_are_loaded() {
        let settled = Loadable::settle(Ok(3)).expect("settled");
        assert_eq!(settled, Loadable::Loaded(3));
        assert_eq!(settled.map(|n| n * 2).loaded(), Some(6));
    }

    #[test]
    fn not_found_is_empty() {
        let settled: Loadable<u32> = Loadable::settle(Err(ApiError::NotFound(
            "No reflection for today yet".into(),
        )))
        .expect("settled");
        assert_eq!(settled, Loadable::Empty("No reflection for today yet".into()));
    }

    #[test]
    fn validation_and_network_failures_are_inline() {
        let settled: Loadable<u32> = Loadable::settle(Err(ApiError::Validation(
            FieldErrors::message("Date parameter is required"),
        )))
        .expect("settled");
        assert_eq!(
            settled,
            Loadable::Failed {
                kind: ErrorKind::Validation,
                message: "Date parameter is required".into(),
            }
        );
    }

    #[test]
    fn unauthorized_escapes() {
        let result: Result<Loadable<u32>, _> =
            Loadable::settle(Err(ApiError::Auth(AuthError::SessionExpired)));
        assert!(matches!(result, Err(ApiError::Auth(AuthError::SessionExpired))));
    }

    #[test]
    fn empty_lists_and_missing_values_are_empty() {
        let settled: Loadable<Vec<u32>> =
            Loadable::settle_list(Ok(Vec::new()), "No entries yet").expect("settled");
        assert_eq!(settled, Loadable::Empty("No entries yet".into()));

        let settled: Loadable<u32> =
            Loadable::settle_optional(Ok(None), "Nothing logged").expect("settled");
        assert_eq!(settled, Loadable::Empty("Nothing logged".into()));
    }

    #[test]
    fn serializes_with_status_tag() {
        let json = serde_json::to_value(Loadable::Loaded(vec![1])).expect("serialize");
        assert_eq!(json, serde_json::json!({"status": "loaded", "data": [1]}));
    }
}
