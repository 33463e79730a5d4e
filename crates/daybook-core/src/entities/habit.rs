use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Frequency, TrackingType};

/// A habit the user tracks day by day.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Habit {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub frequency: Frequency,
    pub tracking_type: TrackingType,
    /// Daily goal for counter habits; always 1 for boolean habits.
    pub target_value: u32,
    pub color: String,
    #[serde(default)]
    pub icon: String,
    pub is_active: bool,
    #[serde(default)]
    pub logs_count: u32,
    #[serde(default)]
    pub current_streak: u32,
    pub created_at: DateTime<Utc>,
}

/// Body for creating or updating a habit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HabitDraft {
    pub name: String,
    pub description: String,
    pub frequency: Frequency,
    pub tracking_type: TrackingType,
    pub target_value: u32,
    pub color: String,
    pub icon: String,
    pub is_active: bool,
}

impl Default for HabitDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            frequency: Frequency::Daily,
            tracking_type: TrackingType::Boolean,
            target_value: 1,
            color: String::from("#3B82F6"),
            icon: String::new(),
            is_active: true,
        }
    }
}

impl From<&Habit> for HabitDraft {
    fn from(habit: &Habit) -> Self {
        Self {
            name: habit.name.clone(),
            description: habit.description.clone(),
            frequency: habit.frequency,
            tracking_type: habit.tracking_type,
            target_value: habit.target_value,
            color: habit.color.clone(),
            icon: habit.icon.clone(),
            is_active: habit.is_active,
        }
    }
}

/// One day's record for a habit. At most one exists per (habit, day).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HabitLog {
    pub id: i64,
    pub habit: i64,
    #[serde(default)]
    pub habit_name: Option<String>,
    pub date: NaiveDate,
    pub value: u32,
    pub completed: bool,
    #[serde(default)]
    pub notes: String,
}

/// Body for `logs/log_habit/`: creates or overwrites today's log.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuickLog {
    pub habit_id: i64,
    pub value: u32,
    #[serde(default)]
    pub notes: String,
}

/// Partial update of an existing log.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HabitLogUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Aggregates returned by `habits/{id}/stats/`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct HabitStats {
    pub total_logs: u32,
    pub completed_logs: u32,
    /// Percentage, 0 to 100.
    pub completion_rate: f64,
    pub average_value: f64,
    pub last_30_days_logs: u32,
}
