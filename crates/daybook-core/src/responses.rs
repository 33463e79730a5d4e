//! CLI response types returned as JSON by `dbk` commands.

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SessionState;
use crate::habits::HabitProgress;
use crate::identity::User;

/// Response from `dbk auth status`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionStatusResponse {
    pub state: SessionState,
    pub user: Option<User>,
    pub base_url: String,
    /// Where the tokens are kept: `file` or `keyring`.
    pub store: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_expires_at: Option<DateTime<Utc>>,
    /// The access token expires within a minute and the next request will
    /// refresh it.
    #[serde(default)]
    pub access_expiring: bool,
}

/// One day cell of `dbk calendar`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub entries: usize,
}

/// Response from `dbk calendar`. Only days with entries are listed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CalendarMonthResponse {
    pub month: String,
    pub days: Vec<CalendarDay>,
    pub total_entries: usize,
}

/// Response from `dbk habit progress`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HabitProgressResponse {
    pub date: NaiveDate,
    pub completed: usize,
    pub habits: Vec<HabitProgress>,
}

/// Response from the `delete` commands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeletedResponse {
    pub id: i64,
    pub deleted: bool,
}

impl DeletedResponse {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self { id, deleted: true }
    }
}
