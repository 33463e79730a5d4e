//! Assembly of a reflection submission from the active questions and the
//! user's answers.
//!
//! Assembly is all-or-nothing. `choice` and `number` questions must be
//! answered; every missing mandatory answer is detected before any default
//! is applied, and the first one aborts assembly. Unanswered `range`
//! questions default to their minimum and unanswered `text` questions to the
//! empty string.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::{Reflection, ReflectionQuestion, ResponsePayload};
use crate::enums::QuestionType;
use crate::errors::CoreError;

/// A user's answer to one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Answer {
    Range(i32),
    Choice(String),
    Text(String),
    Number(f64),
}

impl Answer {
    /// Parse a raw value into the shape `question` declares.
    ///
    /// # Errors
    ///
    /// [`CoreError::AnswerTypeMismatch`] when the text does not parse as the
    /// question's type.
    pub fn parse(question: &ReflectionQuestion, raw: &str) -> Result<Self, CoreError> {
        let raw = raw.trim();
        match question.question_type {
            QuestionType::Range => raw
                .parse()
                .map(Self::Range)
                .map_err(|_| type_mismatch(question)),
            QuestionType::Number => raw
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(Self::Number)
                .ok_or_else(|| type_mismatch(question)),
            QuestionType::Choice => Ok(Self::Choice(raw.to_string())),
            QuestionType::Text => Ok(Self::Text(raw.to_string())),
        }
    }

    const fn question_type(&self) -> QuestionType {
        match self {
            Self::Range(_) => QuestionType::Range,
            Self::Choice(_) => QuestionType::Choice,
            Self::Text(_) => QuestionType::Text,
            Self::Number(_) => QuestionType::Number,
        }
    }

    /// An empty choice counts as no answer.
    fn is_blank(&self) -> bool {
        match self {
            Self::Choice(choice) => choice.trim().is_empty(),
            Self::Number(value) => !value.is_finite(),
            Self::Range(_) | Self::Text(_) => false,
        }
    }
}

/// Build the response list for `questions`, in question order.
///
/// Answers for ids not in `questions` are ignored.
///
/// # Errors
///
/// - [`CoreError::MissingAnswer`] for the first unanswered `choice` or
///   `number` question.
/// - [`CoreError::AnswerTypeMismatch`] when an answer's shape differs from
///   its question's type.
/// - [`CoreError::AnswerOutOfRange`] for a range answer outside the bounds.
/// - [`CoreError::InvalidChoice`] for a choice the question does not offer.
pub fn assemble_responses(
    questions: &[ReflectionQuestion],
    answers: &BTreeMap<i64, Answer>,
) -> Result<Vec<ResponsePayload>, CoreError> {
    let answered = |question: &ReflectionQuestion| {
        answers
            .get(&question.id)
            .filter(|answer| !answer.is_blank())
    };

    if let Some(missing) = questions
        .iter()
        .find(|question| question.question_type.is_mandatory() && answered(*question).is_none())
    {
        return Err(CoreError::MissingAnswer {
            question_id: missing.id,
            question_text: missing.question_text.clone(),
        });
    }

    questions
        .iter()
        .map(|question| build_response(question, answered(question)))
        .collect()
}

fn build_response(
    question: &ReflectionQuestion,
    answer: Option<&Answer>,
) -> Result<ResponsePayload, CoreError> {
    let mut payload = ResponsePayload {
        question_id: question.id,
        range_response: None,
        choice_response: None,
        text_response: None,
        number_response: None,
    };

    if let Some(answer) = answer
        && answer.question_type() != question.question_type
    {
        return Err(type_mismatch(question));
    }

    match (question.question_type, answer) {
        (QuestionType::Range, Some(Answer::Range(value))) => {
            if *value < question.min_value || *value > question.max_value {
                return Err(CoreError::AnswerOutOfRange {
                    question_id: question.id,
                    question_text: question.question_text.clone(),
                    min: question.min_value,
                    max: question.max_value,
                    value: *value,
                });
            }
            payload.range_response = Some(*value);
        }
        (QuestionType::Range, _) => payload.range_response = Some(question.min_value),
        (QuestionType::Text, Some(Answer::Text(text))) => {
            payload.text_response = Some(text.clone());
        }
        (QuestionType::Text, _) => payload.text_response = Some(String::new()),
        (QuestionType::Choice, Some(Answer::Choice(choice))) => {
            if !question.choices().iter().any(|known| known == choice) {
                return Err(CoreError::InvalidChoice {
                    question_id: question.id,
                    question_text: question.question_text.clone(),
                    value: choice.clone(),
                });
            }
            payload.choice_response = Some(choice.clone());
        }
        (QuestionType::Number, Some(Answer::Number(value))) => {
            payload.number_response = Some(*value);
        }
        (QuestionType::Choice | QuestionType::Number, _) => {
            return Err(CoreError::MissingAnswer {
                question_id: question.id,
                question_text: question.question_text.clone(),
            });
        }
    }
    Ok(payload)
}

/// Answers recorded in an existing reflection, for pre-filling an edit.
#[must_use]
pub fn answers_from_reflection(reflection: &Reflection) -> BTreeMap<i64, Answer> {
    reflection
        .responses
        .iter()
        .filter_map(|response| {
            let answer = if let Some(value) = response.range_response {
                Answer::Range(value)
            } else if let Some(choice) = &response.choice_response {
                Answer::Choice(choice.clone())
            } else if let Some(value) = response.number_response {
                Answer::Number(value)
            } else {
                Answer::Text(response.text_response.clone()?)
            };
            Some((response.question_id, answer))
        })
        .collect()
}

fn type_mismatch(question: &ReflectionQuestion) -> CoreError {
    CoreError::AnswerTypeMismatch {
        question_id: question.id,
        question_text: question.question_text.clone(),
        expected: question.question_type.to_string(),
    }
}
