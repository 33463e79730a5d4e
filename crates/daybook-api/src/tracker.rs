//! Habit tracker endpoints under `/api/tracker/`.

use chrono::NaiveDate;
use daybook_core::entities::{
    Habit, HabitDraft, HabitLog, HabitLogUpdate, HabitStats, Listing, QuickLog,
};

use crate::client::DaybookClient;
use crate::error::ApiError;
use crate::http::with_query;

const HABITS: &str = "/api/tracker/habits/";
const LOGS: &str = "/api/tracker/logs/";

fn ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl DaybookClient {
    // -----------------------------------------------------------------------
    // Habits
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// Transport, status and session errors as [`ApiError`].
    pub async fn list_habits(&mut self) -> Result<Vec<Habit>, ApiError> {
        let listing: Listing<Habit> = self.get_json(HABITS).await?;
        Ok(listing.into_items())
    }

    /// # Errors
    ///
    /// Transport, status and session errors as [`ApiError`].
    pub async fn active_habits(&mut self) -> Result<Vec<Habit>, ApiError> {
        let listing: Listing<Habit> = self.get_json(&format!("{HABITS}active/")).await?;
        Ok(listing.into_items())
    }

    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown habit.
    pub async fn get_habit(&mut self, id: i64) -> Result<Habit, ApiError> {
        self.get_json(&format!("{HABITS}{id}/")).await
    }

    /// # Errors
    ///
    /// [`ApiError::Validation`] for a refused draft.
    pub async fn create_habit(&mut self, draft: &HabitDraft) -> Result<Habit, ApiError> {
        self.post_json(HABITS, draft).await
    }

    /// # Errors
    ///
    /// [`ApiError::NotFound`] or [`ApiError::Validation`].
    pub async fn update_habit(&mut self, id: i64, draft: &HabitDraft) -> Result<Habit, ApiError> {
        self.put_json(&format!("{HABITS}{id}/"), draft).await
    }

    /// Deletes the habit and its logs.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown habit.
    pub async fn delete_habit(&mut self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("{HABITS}{id}/")).await
    }

    /// Flip `is_active`; returns the updated habit.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown habit.
    pub async fn toggle_habit(&mut self, id: i64) -> Result<Habit, ApiError> {
        self.post_empty(&format!("{HABITS}{id}/toggle_active/"))
            .await
    }

    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown habit.
    pub async fn habit_stats(&mut self, id: i64) -> Result<HabitStats, ApiError> {
        self.get_json(&format!("{HABITS}{id}/stats/")).await
    }

    // -----------------------------------------------------------------------
    // Logs
    // -----------------------------------------------------------------------

    /// Logs, optionally narrowed to one habit and/or one day.
    ///
    /// # Errors
    ///
    /// Transport, status and session errors as [`ApiError`].
    pub async fn list_logs(
        &mut self,
        habit: Option<i64>,
        date: Option<NaiveDate>,
    ) -> Result<Vec<HabitLog>, ApiError> {
        let path = with_query(
            LOGS,
            &[
                ("habit", habit.map(|id| id.to_string())),
                ("date", date.map(ymd)),
            ],
        );
        let listing: Listing<HabitLog> = self.get_json(&path).await?;
        Ok(listing.into_items())
    }

    /// Today's logs, "today" being the server's date.
    ///
    /// # Errors
    ///
    /// Transport, status and session errors as [`ApiError`].
    pub async fn today_logs(&mut self) -> Result<Vec<HabitLog>, ApiError> {
        let listing: Listing<HabitLog> = self.get_json(&format!("{LOGS}today/")).await?;
        Ok(listing.into_items())
    }

    /// Record progress for today. Counter habits add `value` to an existing
    /// log, boolean habits replace it.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown habit.
    pub async fn log_habit(&mut self, log: &QuickLog) -> Result<HabitLog, ApiError> {
        let saved: HabitLog = self.post_json(&format!("{LOGS}log_habit/"), log).await?;
        tracing::debug!(habit = saved.habit, value = saved.value, completed = saved.completed, "habit logged");
        Ok(saved)
    }

    /// Logs between `from` and `to`, both inclusive.
    ///
    /// # Errors
    ///
    /// Transport, status and session errors as [`ApiError`].
    pub async fn logs_in_range(
        &mut self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<HabitLog>, ApiError> {
        let path = with_query(
            &format!("{LOGS}date_range/"),
            &[("start_date", Some(ymd(from))), ("end_date", Some(ymd(to)))],
        );
        let listing: Listing<HabitLog> = self.get_json(&path).await?;
        Ok(listing.into_items())
    }

    /// # Errors
    ///
    /// [`ApiError::NotFound`] or [`ApiError::Validation`].
    pub async fn update_log(&mut self, id: i64, update: &HabitLogUpdate) -> Result<HabitLog, ApiError> {
        self.patch_json(&format!("{LOGS}{id}/"), update).await
    }

    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown log.
    pub async fn delete_log(&mut self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("{LOGS}{id}/")).await
    }
}
