//! Daily habit progress derived from habits and their logs.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Habit, HabitLog};
use crate::enums::TrackingType;

/// Whether a logged value completes the habit for the day.
///
/// Boolean habits complete at 1, counter habits at their target.
#[must_use]
pub fn is_completed(tracking_type: TrackingType, target_value: u32, value: u32) -> bool {
    match tracking_type {
        TrackingType::Boolean => value >= 1,
        TrackingType::Counter => value >= target_value.max(1),
    }
}

/// Whether `log` counts as done for `habit`.
///
/// The stored flag is honoured, and the client rule covers logs the backend
/// left unflagged.
#[must_use]
pub fn log_completes(habit: &Habit, log: &HabitLog) -> bool {
    log.completed || is_completed(habit.tracking_type, habit.target_value, log.value)
}

/// One habit's standing for a single day.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HabitProgress {
    pub habit_id: i64,
    pub name: String,
    pub tracking_type: TrackingType,
    pub target_value: u32,
    pub value: u32,
    pub completed: bool,
    /// `value / target`, capped at 100.
    pub percent: u8,
    pub current_streak: u32,
}

impl HabitProgress {
    #[must_use]
    pub fn new(habit: &Habit, log: Option<&HabitLog>) -> Self {
        let value = log.map_or(0, |log| log.value);
        let target = match habit.tracking_type {
            TrackingType::Boolean => 1,
            TrackingType::Counter => habit.target_value.max(1),
        };
        let percent = (u64::from(value) * 100 / u64::from(target)).min(100);
        Self {
            habit_id: habit.id,
            name: habit.name.clone(),
            tracking_type: habit.tracking_type,
            target_value: target,
            value,
            completed: log.is_some_and(|log| log_completes(habit, log)),
            percent: u8::try_from(percent).unwrap_or(100),
            current_streak: habit.current_streak,
        }
    }
}

/// Logs keyed by (habit, day).
///
/// The backend keeps one log per habit per day; if a listing still contains
/// duplicates, the log with the highest id wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogIndex {
    logs: BTreeMap<(i64, NaiveDate), HabitLog>,
}

impl LogIndex {
    #[must_use]
    pub fn from_logs(logs: impl IntoIterator<Item = HabitLog>) -> Self {
        let mut index: BTreeMap<(i64, NaiveDate), HabitLog> = BTreeMap::new();
        for log in logs {
            let key = (log.habit, log.date);
            let keep_existing = index
                .get(&key)
                .is_some_and(|existing| existing_wins(existing, &log));
            if !keep_existing {
                index.insert(key, log);
            }
        }
        Self { logs: index }
    }

    #[must_use]
    pub fn get(&self, habit_id: i64, day: NaiveDate) -> Option<&HabitLog> {
        self.logs.get(&(habit_id, day))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.logs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    /// Progress of every habit on `day`, in the order given.
    #[must_use]
    pub fn progress_on(&self, habits: &[Habit], day: NaiveDate) -> Vec<HabitProgress> {
        habits
            .iter()
            .map(|habit| HabitProgress::new(habit, self.get(habit.id, day)))
            .collect()
    }

    /// Days in `[from, to]` on which `habit` was completed.
    #[must_use]
    pub fn completed_days(&self, habit: &Habit, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        self.logs
            .range((habit.id, from)..=(habit.id, to))
            .filter(|(_, log)| log_completes(habit, log))
            .map(|((_, day), _)| *day)
            .collect()
    }
}

const fn existing_wins(existing: &HabitLog, candidate: &HabitLog) -> bool {
    existing.id > candidate.id
}
