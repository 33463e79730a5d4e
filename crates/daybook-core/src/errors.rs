//! Cross-cutting error types for Daybook.
//!
//! `CoreError` covers the client-side checks performed in this crate (block
//! editing, reflection answer assembly, session transitions). Transport errors
//! are defined in `daybook-auth` and `daybook-api`; every error in the system
//! reports an [`ErrorKind`] so callers can apply one handling policy.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by client-side checks.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// A block index does not exist in the list.
    #[error("block index {index} out of range (list has {len} blocks)")]
    BlockIndexOutOfRange { index: usize, len: usize },

    /// A field edit does not apply to the block's type.
    #[error("cannot set {field} on a {block_type} block at index {index}")]
    FieldMismatch {
        index: usize,
        block_type: String,
        field: &'static str,
    },

    /// A text block has no text.
    #[error("text block {index} is empty")]
    EmptyTextBlock { index: usize },

    /// An image or video block has no media reference.
    #[error("{block_type} block {index} has no media attached")]
    MissingMedia { index: usize, block_type: String },

    /// A mandatory reflection question was left unanswered.
    #[error("please answer: {question_text}")]
    MissingAnswer {
        question_id: i64,
        question_text: String,
    },

    /// The answer value does not have the shape the question declares.
    #[error("answer to '{question_text}' must be a {expected} value")]
    AnswerTypeMismatch {
        question_id: i64,
        question_text: String,
        expected: String,
    },

    /// A range answer falls outside the question's bounds.
    #[error("answer to '{question_text}' must be between {min} and {max} (got {value})")]
    AnswerOutOfRange {
        question_id: i64,
        question_text: String,
        min: i32,
        max: i32,
        value: i32,
    },

    /// A choice answer is not one of the question's choices.
    #[error("'{value}' is not a valid choice for '{question_text}'")]
    InvalidChoice {
        question_id: i64,
        question_text: String,
        value: String,
    },

    /// A session state transition that the state machine forbids.
    #[error("invalid session transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// Data failed validation (format, constraints).
    #[error("validation error: {0}")]
    Validation(String),
}

impl CoreError {
    /// Every client-side check is a validation failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidTransition { .. } => ErrorKind::Other,
            _ => ErrorKind::Validation,
        }
    }
}

/// The error taxonomy every failure is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request could not be sent or no response arrived.
    #[serde(rename = "network_error")]
    Network,
    /// HTTP 401 that survived the refresh-once policy.
    Unauthorized,
    /// HTTP 4xx with a structured field-error body, or a client-side check.
    #[serde(rename = "validation_error")]
    Validation,
    /// The referenced entity does not exist.
    NotFound,
    /// Anything else (5xx, malformed bodies, local storage failures).
    Other,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network_error",
            Self::Unauthorized => "unauthorized",
            Self::Validation => "validation_error",
            Self::NotFound => "not_found",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level validation messages returned by the backend.
///
/// The backend answers rejected writes with `{ "field": ["message", ...] }`,
/// `{ "detail": "..." }` or `{ "error": "..." }`. All three shapes are folded
/// into one map; free-form messages land under `non_field_errors`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

const NON_FIELD: &str = "non_field_errors";

impl FieldErrors {
    /// Parse a backend error body. Unknown shapes become a single
    /// `non_field_errors` message containing the raw text.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
            return Self::message(body.trim());
        };

        let mut fields = BTreeMap::new();
        match value {
            serde_json::Value::Object(map) => {
                for (key, value) in map {
                    let key = match key.as_str() {
                        "detail" | "error" | "message" => NON_FIELD.to_string(),
                        _ => key,
                    };
                    let messages = flatten_messages(&value);
                    if !messages.is_empty() {
                        fields
                            .entry(key)
                            .or_insert_with(Vec::new)
                            .extend(messages);
                    }
                }
            }
            other => {
                let messages = flatten_messages(&other);
                if !messages.is_empty() {
                    fields.insert(NON_FIELD.to_string(), messages);
                }
            }
        }
        Self(fields)
    }

    /// A single free-form message.
    #[must_use]
    pub fn message(text: &str) -> Self {
        let mut fields = BTreeMap::new();
        if !text.is_empty() {
            fields.insert(NON_FIELD.to_string(), vec![text.to_string()]);
        }
        Self(fields)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages for one field.
    #[must_use]
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    /// One-line summary: the first message, prefixed with a human field label.
    ///
    /// Free-form messages are preferred over field messages.
    #[must_use]
    pub fn summary(&self) -> String {
        if let Some(message) = self.get(NON_FIELD).first() {
            return message.clone();
        }
        self.0
            .iter()
            .find_map(|(field, messages)| {
                messages
                    .first()
                    .map(|message| format!("{}: {message}", field_label(field)))
            })
            .unwrap_or_else(|| String::from("request rejected"))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

fn flatten_messages(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::String(text) => vec![text.clone()],
        serde_json::Value::Array(items) => items.iter().flat_map(flatten_messages).collect(),
        serde_json::Value::Object(map) => map
            .iter()
            .flat_map(|(key, value)| {
                flatten_messages(value)
                    .into_iter()
                    .map(move |message| format!("{key}: {message}"))
            })
            .collect(),
        serde_json::Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

/// `first_name` → `First name`.
fn field_label(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
