use std::collections::BTreeMap;

use daybook_core::answers::{Answer, answers_from_reflection, assemble_responses};
use daybook_core::entities::{ReflectionQuestion, ReflectionSubmission};

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::{parse_assignment, parse_date};
use crate::context::AppContext;
use crate::output::{Table, output_with_table};
use crate::progress::Progress;

/// Answers already recorded for the day are kept unless overridden.
pub async fn run(
    raw_answers: &[String],
    notes: &str,
    date: Option<&str>,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let date = match date {
        Some(raw) => parse_date(raw, "date")?,
        None => ctx.today(),
    };
    let client = ctx.require_session()?;
    let progress = Progress::spinner("loading questions");
    let questions = client.active_questions().await?;
    if questions.is_empty() {
        anyhow::bail!("there are no active reflection questions to answer");
    }
    let existing = client.reflection_on(date).await?;

    let mut answers = existing
        .as_ref()
        .map(answers_from_reflection)
        .unwrap_or_default();
    answers.extend(parse_answers(&questions, raw_answers)?);
    let notes = match existing {
        Some(reflection) if notes.is_empty() => reflection.notes,
        _ => notes.to_string(),
    };

    let responses = assemble_responses(&questions, &answers)?;
    let submission = ReflectionSubmission::new(date, notes, responses);

    progress.set_message("saving reflection");
    let saved = client.submit_reflection(&submission).await;
    progress.finish_clear();
    let saved = saved?;

    tracing::info!(%date, answers = saved.responses.len(), "reflection saved");
    output_with_table(&saved, flags.format, |saved: &ReflectionSubmission| {
        submission_table(saved, &questions)
    })
}

/// `QUESTION_ID=VALUE` pairs, each parsed as its question's type.
fn parse_answers(
    questions: &[ReflectionQuestion],
    raw_answers: &[String],
) -> anyhow::Result<BTreeMap<i64, Answer>> {
    raw_answers
        .iter()
        .map(|raw| {
            let (id, value) = parse_assignment::<i64>(raw, "--answer")?;
            let question = questions
                .iter()
                .find(|question| question.id == id)
                .ok_or_else(|| anyhow::anyhow!("question {id} is not an active question"))?;
            Ok((id, Answer::parse(question, &value)?))
        })
        .collect()
}

fn submission_table(saved: &ReflectionSubmission, questions: &[ReflectionQuestion]) -> Table {
    let mut table = Table::new(["question", "answer"]);
    for response in &saved.responses {
        let question = questions
            .iter()
            .find(|question| question.id == response.question_id)
            .map_or_else(
                || format!("#{}", response.question_id),
                |question| question.question_text.clone(),
            );
        let answer = response
            .range_response
            .map(|value| value.to_string())
            .or_else(|| response.choice_response.clone())
            .or_else(|| response.number_response.map(|value| value.to_string()))
            .or_else(|| response.text_response.clone())
            .unwrap_or_default();
        table.push([question, answer]);
    }
    if !saved.notes.is_empty() {
        table.push([String::from("notes"), saved.notes.clone()]);
    }
    table
}

#[cfg(test)]
mod tests {
    use daybook_core::enums::QuestionType;
    use pretty_assertions::assert_eq;

    use super::*;

    fn question(id: i64, question_type: QuestionType) -> ReflectionQuestion {
        ReflectionQuestion {
            id,
            question_text: format!("question {id}"),
            question_type,
            min_value: 1,
            max_value: 10,
            choices: Some(vec!["calm".into(), "tense".into()]),
            color_mapping: None,
            is_active: true,
            order: 0,
            category: "general".into(),
        }
    }

    #[test]
    fn answers_parse_against_their_question() {
        let questions = [question(1, QuestionType::Range), question(2, QuestionType::Choice)];
        let answers =
            parse_answers(&questions, &["1=7".into(), "2=calm".into()]).expect("answers");
        assert_eq!(answers.get(&1), Some(&Answer::Range(7)));
        assert_eq!(answers.get(&2), Some(&Answer::Choice("calm".into())));
    }

    #[test]
    fn unknown_question_is_rejected() {
        let questions = [question(1, QuestionType::Range)];
        let err = parse_answers(&questions, &["9=3".into()]).expect_err("unknown id");
        assert!(err.to_string().contains("question 9 is not an active question"));
    }

    #[test]
    fn malformed_range_answer_is_rejected() {
        let questions = [question(1, QuestionType::Range)];
        assert!(parse_answers(&questions, &["1=lots".into()]).is_err());
    }
}
