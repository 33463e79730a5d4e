use std::collections::BTreeMap;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::QuestionType;

const fn default_min() -> i32 {
    1
}

const fn default_max() -> i32 {
    10
}

const fn default_true() -> bool {
    true
}

/// A question the user answers in the daily reflection.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReflectionQuestion {
    pub id: i64,
    pub question_text: String,
    pub question_type: QuestionType,
    #[serde(default = "default_min")]
    pub min_value: i32,
    #[serde(default = "default_max")]
    pub max_value: i32,
    /// Options for `choice` questions.
    #[serde(default)]
    pub choices: Option<Vec<String>>,
    /// Answer value → display color.
    #[serde(default)]
    pub color_mapping: Option<BTreeMap<String, String>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub category: String,
}

impl ReflectionQuestion {
    #[must_use]
    pub fn choices(&self) -> &[String] {
        self.choices.as_deref().unwrap_or_default()
    }
}

/// Body for creating or updating a question.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question_text: String,
    pub question_type: QuestionType,
    pub min_value: i32,
    pub max_value: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    pub category: String,
    pub order: u32,
    pub is_active: bool,
}

impl Default for QuestionDraft {
    fn default() -> Self {
        Self {
            question_text: String::new(),
            question_type: QuestionType::Range,
            min_value: default_min(),
            max_value: default_max(),
            choices: None,
            category: String::from("general"),
            order: 0,
            is_active: true,
        }
    }
}

impl From<&ReflectionQuestion> for QuestionDraft {
    fn from(question: &ReflectionQuestion) -> Self {
        Self {
            question_text: question.question_text.clone(),
            question_type: question.question_type,
            min_value: question.min_value,
            max_value: question.max_value,
            choices: question.choices.clone(),
            category: question.category.clone(),
            order: question.order,
            is_active: question.is_active,
        }
    }
}

/// `questions/categories/` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuestionCategories {
    pub categories: Vec<String>,
}

/// All answers given on one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Reflection {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub responses: Vec<ReflectionResponse>,
}

/// A stored answer. Exactly one `*_response` field is set, matching
/// `question_type`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ReflectionResponse {
    #[serde(default)]
    pub id: Option<i64>,
    pub question_id: i64,
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub question_type: Option<QuestionType>,
    #[serde(default)]
    pub range_response: Option<i32>,
    #[serde(default)]
    pub choice_response: Option<String>,
    #[serde(default)]
    pub text_response: Option<String>,
    #[serde(default)]
    pub number_response: Option<f64>,
}

/// One answer inside a submission body.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ResponsePayload {
    pub question_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_response: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choice_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_response: Option<f64>,
}

/// Body for `reflections/`: the whole day's answers at once.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ReflectionSubmission {
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    pub responses: Vec<ResponsePayload>,
}

impl ReflectionSubmission {
    #[must_use]
    pub fn new(date: NaiveDate, notes: impl Into<String>, responses: Vec<ResponsePayload>) -> Self {
        Self {
            date,
            notes: notes.into(),
            responses,
        }
    }
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct QuestionAverage {
    pub question_id: i64,
    pub question_text: String,
    pub average: f64,
    pub count: u32,
}

/// `reflections/stats/` response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ReflectionStats {
    pub total_reflections: u32,
    pub days_analyzed: u32,
    pub current_streak: u32,
    #[serde(default)]
    pub question_averages: Vec<QuestionAverage>,
}

/// `reflections/streak/` response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReflectionStreak {
    pub current_streak: u32,
}
