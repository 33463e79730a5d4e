use daybook_api::Loadable;
use daybook_core::entities::{QuestionDraft, ReflectionQuestion};
use daybook_core::enums::QuestionType;
use daybook_core::responses::DeletedResponse;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::reflect::{QuestionCommands, QuestionFields, QuestionUpdateFields};
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::{Table, output, output_loadable, output_loadable_table, output_with_table};

pub async fn list(
    all: bool,
    category: Option<&str>,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = ctx.require_session()?;
    let result = if all || category.is_some() {
        client.list_questions((!all).then_some(true), category).await
    } else {
        client.active_questions().await
    };
    let questions = Loadable::settle_list(result, "no reflection questions yet")?;
    output_loadable_table(&questions, flags.format, |questions: &Vec<ReflectionQuestion>| {
        questions_table(questions)
    })
}

pub async fn categories(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let result = ctx.require_session()?.question_categories().await;
    let categories = Loadable::settle_list(result, "no categories yet")?;
    output_loadable(&categories, flags.format)
}

pub async fn manage(
    action: &QuestionCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = ctx.require_session()?;
    let question = match action {
        QuestionCommands::Add(fields) => {
            let draft = draft_from_fields(fields)?;
            client.create_question(&draft).await?
        }
        QuestionCommands::Edit { id, fields } => {
            let current = client.get_question(*id).await?;
            let draft = apply_update(QuestionDraft::from(&current), fields)?;
            client.update_question(*id, &draft).await?
        }
        QuestionCommands::Delete { id } => {
            client.delete_question(*id).await?;
            return output(&DeletedResponse::new(*id), flags.format);
        }
    };
    output_with_table(&question, flags.format, |question: &ReflectionQuestion| {
        questions_table(std::slice::from_ref(question))
    })
}

fn questions_table(questions: &[ReflectionQuestion]) -> Table {
    let mut table = Table::new(["id", "order", "category", "type", "answers", "question", "status"]);
    for question in questions {
        let answers = match question.question_type {
            QuestionType::Range => format!("{}..{}", question.min_value, question.max_value),
            QuestionType::Choice => question.choices().join(" / "),
            QuestionType::Text | QuestionType::Number => String::new(),
        };
        table.push([
            question.id.to_string(),
            question.order.to_string(),
            question.category.clone(),
            question.question_type.to_string(),
            answers,
            question.question_text.clone(),
            String::from(if question.is_active { "active" } else { "inactive" }),
        ]);
    }
    table
}

fn draft_from_fields(fields: &QuestionFields) -> anyhow::Result<QuestionDraft> {
    let draft = QuestionDraft {
        question_text: fields.text.trim().to_string(),
        question_type: parse_enum(&fields.question_type, "type")?,
        min_value: fields.min,
        max_value: fields.max,
        choices: (!fields.choices.is_empty()).then(|| fields.choices.clone()),
        category: fields.category.trim().to_string(),
        order: fields.order,
        is_active: true,
    };
    check_draft(&draft)?;
    Ok(draft)
}

fn apply_update(
    mut draft: QuestionDraft,
    fields: &QuestionUpdateFields,
) -> anyhow::Result<QuestionDraft> {
    if let Some(text) = &fields.text {
        draft.question_text = text.trim().to_string();
    }
    if let Some(question_type) = &fields.question_type {
        draft.question_type = parse_enum(question_type, "type")?;
    }
    if let Some(min) = fields.min {
        draft.min_value = min;
    }
    if let Some(max) = fields.max {
        draft.max_value = max;
    }
    if !fields.choices.is_empty() {
        draft.choices = Some(fields.choices.clone());
    }
    if let Some(category) = &fields.category {
        draft.category = category.trim().to_string();
    }
    if let Some(order) = fields.order {
        draft.order = order;
    }
    if let Some(active) = fields.active {
        draft.is_active = active;
    }
    check_draft(&draft)?;
    Ok(draft)
}

fn check_draft(draft: &QuestionDraft) -> anyhow::Result<()> {
    if draft.question_text.is_empty() {
        anyhow::bail!("question text must not be empty");
    }
    match draft.question_type {
        QuestionType::Range if draft.min_value >= draft.max_value => {
            anyhow::bail!(
                "range minimum ({}) must be below its maximum ({})",
                draft.min_value,
                draft.max_value
            )
        }
        QuestionType::Choice if draft.choices.as_ref().is_none_or(Vec::is_empty) => {
            anyhow::bail!("choice questions need at least one --choice")
        }
        _ => Ok(()),
    }
}
