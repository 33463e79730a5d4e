mod history;
mod questions;
mod submit;

use daybook_core::entities::{Reflection, ReflectionResponse};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReflectCommands;
use crate::context::AppContext;
use crate::output::Table;

/// Handle `dbk reflect <subcommand>`.
pub async fn handle(
    action: &ReflectCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ReflectCommands::Questions { all, category } => {
            questions::list(*all, category.as_deref(), ctx, flags).await
        }
        ReflectCommands::Question { action } => questions::manage(action, ctx, flags).await,
        ReflectCommands::Categories => questions::categories(ctx, flags).await,
        ReflectCommands::Today => history::today(ctx, flags).await,
        ReflectCommands::Submit {
            answers,
            notes,
            date,
        } => submit::run(answers, notes, date.as_deref(), ctx, flags).await,
        ReflectCommands::History { from, to } => match (from, to) {
            (Some(from), Some(to)) => history::range(from, to, ctx, flags).await,
            _ => history::all(ctx, flags).await,
        },
        ReflectCommands::Delete { date } => history::delete(date, ctx, flags).await,
        ReflectCommands::Stats { days } => history::stats(*days, ctx, flags).await,
        ReflectCommands::Streak => history::streak(ctx, flags).await,
    }
}

fn answer_text(response: &ReflectionResponse) -> String {
    if let Some(value) = response.range_response {
        value.to_string()
    } else if let Some(choice) = &response.choice_response {
        choice.clone()
    } else if let Some(value) = response.number_response {
        value.to_string()
    } else {
        response.text_response.clone().unwrap_or_default()
    }
}

fn responses_table(reflection: &Reflection) -> Table {
    let mut table = Table::new(["question", "answer"]);
    for response in &reflection.responses {
        let question = if response.question_text.is_empty() {
            format!("#{}", response.question_id)
        } else {
            response.question_text.clone()
        };
        table.push([question, answer_text(response)]);
    }
    if !reflection.notes.is_empty() {
        table.push([String::from("notes"), reflection.notes.clone()]);
    }
    table
}
