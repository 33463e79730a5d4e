//! Self-reflection endpoints under `/api/self-reflection/`.
//!
//! Submitting is an upsert keyed by date: posting a second submission for
//! the same day replaces that day's answers. The backend echoes the
//! submission back without an id.

use chrono::NaiveDate;
use daybook_core::entities::{
    DashboardStats, Listing, QuestionCategories, QuestionDraft, Reflection, ReflectionQuestion,
    ReflectionStats, ReflectionStreak, ReflectionSubmission,
};

use crate::client::DaybookClient;
use crate::error::ApiError;
use crate::http::with_query;

const QUESTIONS: &str = "/api/self-reflection/questions/";
const REFLECTIONS: &str = "/api/self-reflection/reflections/";

fn ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl DaybookClient {
    // -----------------------------------------------------------------------
    // Questions
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// Transport, status and session errors as [`ApiError`].
    pub async fn list_questions(
        &mut self,
        is_active: Option<bool>,
        category: Option<&str>,
    ) -> Result<Vec<ReflectionQuestion>, ApiError> {
        let path = with_query(
            QUESTIONS,
            &[
                ("is_active", is_active.map(|active| active.to_string())),
                ("category", category.map(str::to_string)),
            ],
        );
        let listing: Listing<ReflectionQuestion> = self.get_json(&path).await?;
        Ok(listing.into_items())
    }

    /// Active questions in display order.
    ///
    /// # Errors
    ///
    /// Transport, status and session errors as [`ApiError`].
    pub async fn active_questions(&mut self) -> Result<Vec<ReflectionQuestion>, ApiError> {
        let listing: Listing<ReflectionQuestion> =
            self.get_json(&format!("{QUESTIONS}active/")).await?;
        let mut questions = listing.into_items();
        questions.sort_by_key(|question| (question.order, question.id));
        Ok(questions)
    }

    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown question.
    pub async fn get_question(&mut self, id: i64) -> Result<ReflectionQuestion, ApiError> {
        self.get_json(&format!("{QUESTIONS}{id}/")).await
    }

    /// # Errors
    ///
    /// [`ApiError::Validation`] for a refused draft.
    pub async fn create_question(
        &mut self,
        draft: &QuestionDraft,
    ) -> Result<ReflectionQuestion, ApiError> {
        self.post_json(QUESTIONS, draft).await
    }

    /// # Errors
    ///
    /// [`ApiError::NotFound`] or [`ApiError::Validation`].
    pub async fn update_question(
        &mut self,
        id: i64,
        draft: &QuestionDraft,
    ) -> Result<ReflectionQuestion, ApiError> {
        self.put_json(&format!("{QUESTIONS}{id}/"), draft).await
    }

    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown question.
    pub async fn delete_question(&mut self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("{QUESTIONS}{id}/")).await
    }

    /// Distinct non-empty categories of the active questions.
    ///
    /// # Errors
    ///
    /// Transport, status and session errors as [`ApiError`].
    pub async fn question_categories(&mut self) -> Result<Vec<String>, ApiError> {
        let categories: QuestionCategories =
            self.get_json(&format!("{QUESTIONS}categories/")).await?;
        Ok(categories.categories)
    }

    // -----------------------------------------------------------------------
    // Reflections
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// Transport, status and session errors as [`ApiError`].
    pub async fn list_reflections(&mut self) -> Result<Vec<Reflection>, ApiError> {
        let listing: Listing<Reflection> = self.get_json(REFLECTIONS).await?;
        Ok(listing.into_items())
    }

    /// Today's reflection, or `None` when nothing was submitted yet.
    ///
    /// # Errors
    ///
    /// Transport, status and session errors as [`ApiError`].
    pub async fn today_reflection(&mut self) -> Result<Option<Reflection>, ApiError> {
        self.get_optional(&format!("{REFLECTIONS}today/")).await
    }

    /// # Errors
    ///
    /// Transport, status and session errors as [`ApiError`].
    pub async fn reflection_on(&mut self, date: NaiveDate) -> Result<Option<Reflection>, ApiError> {
        let path = with_query(&format!("{REFLECTIONS}by_date/"), &[("date", Some(ymd(date)))]);
        self.get_optional(&path).await
    }

    /// Reflections between `from` and `to`, both inclusive.
    ///
    /// # Errors
    ///
    /// Transport, status and session errors as [`ApiError`].
    pub async fn reflections_in_range(
        &mut self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Reflection>, ApiError> {
        let path = with_query(
            &format!("{REFLECTIONS}date_range/"),
            &[("start_date", Some(ymd(from))), ("end_date", Some(ymd(to)))],
        );
        let listing: Listing<Reflection> = self.get_json(&path).await?;
        Ok(listing.into_items())
    }

    /// Submit the answers for one day. Build `submission` with
    /// [`daybook_core::answers::assemble_responses`] so every mandatory
    /// question is answered.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] when the backend refuses an answer.
    pub async fn submit_reflection(
        &mut self,
        submission: &ReflectionSubmission,
    ) -> Result<ReflectionSubmission, ApiError> {
        let saved: ReflectionSubmission = self.post_json(REFLECTIONS, submission).await?;
        tracing::debug!(date = %saved.date, responses = saved.responses.len(), "reflection saved");
        Ok(saved)
    }

    /// # Errors
    ///
    /// [`ApiError::NotFound`] or [`ApiError::Validation`].
    pub async fn update_reflection(
        &mut self,
        id: i64,
        submission: &ReflectionSubmission,
    ) -> Result<ReflectionSubmission, ApiError> {
        self.put_json(&format!("{REFLECTIONS}{id}/"), submission)
            .await
    }

    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown reflection.
    pub async fn delete_reflection(&mut self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("{REFLECTIONS}{id}/")).await
    }

    /// Totals and range-question averages over the last `days` days.
    ///
    /// # Errors
    ///
    /// Transport, status and session errors as [`ApiError`].
    pub async fn reflection_stats(&mut self, days: u32) -> Result<ReflectionStats, ApiError> {
        let path = with_query(
            &format!("{REFLECTIONS}stats/"),
            &[("days", Some(days.to_string()))],
        );
        self.get_json(&path).await
    }

    /// Consecutive days with a reflection, ending today.
    ///
    /// # Errors
    ///
    /// Transport, status and session errors as [`ApiError`].
    pub async fn reflection_streak(&mut self) -> Result<u32, ApiError> {
        let streak: ReflectionStreak = self.get_json(&format!("{REFLECTIONS}streak/")).await?;
        Ok(streak.current_streak)
    }

    /// Chart data for every active question, or for one.
    ///
    /// # Errors
    ///
    /// Transport, status and session errors as [`ApiError`].
    pub async fn dashboard_stats(
        &mut self,
        days: u32,
        question_id: Option<i64>,
    ) -> Result<DashboardStats, ApiError> {
        let path = with_query(
            &format!("{REFLECTIONS}dashboard_stats/"),
            &[
                ("days", Some(days.to_string())),
                ("question_id", question_id.map(|id| id.to_string())),
            ],
        );
        self.get_json(&path).await
    }
}
