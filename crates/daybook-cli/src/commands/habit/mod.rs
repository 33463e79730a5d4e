mod logs;
mod manage;
mod progress;

use daybook_core::entities::{Habit, HabitLog};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::HabitCommands;
use crate::context::AppContext;
use crate::output::Table;

/// Handle `dbk habit <subcommand>`.
pub async fn handle(
    action: &HabitCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        HabitCommands::List { active } => manage::list(*active, ctx, flags).await,
        HabitCommands::Create(fields) => manage::create(fields, ctx, flags).await,
        HabitCommands::Update { id, fields } => manage::update(*id, fields, ctx, flags).await,
        HabitCommands::Delete { id } => manage::delete(*id, ctx, flags).await,
        HabitCommands::Toggle { id } => manage::toggle(*id, ctx, flags).await,
        HabitCommands::Stats { id } => manage::stats(*id, ctx, flags).await,
        HabitCommands::Log { id, value, notes } => {
            logs::log(*id, *value, notes.as_deref(), ctx, flags).await
        }
        HabitCommands::LogEdit { id, value, notes } => {
            logs::edit(*id, *value, notes.clone(), ctx, flags).await
        }
        HabitCommands::LogDelete { id } => logs::delete(*id, ctx, flags).await,
        HabitCommands::Today => logs::today(ctx, flags).await,
        HabitCommands::Logs { habit, date } => {
            logs::filtered(*habit, date.as_deref(), ctx, flags).await
        }
        HabitCommands::Range { from, to } => logs::range(from, to, ctx, flags).await,
        HabitCommands::Progress { date } => progress::run(date.as_deref(), ctx, flags).await,
    }
}

fn habits_table(habits: &[Habit]) -> Table {
    let mut table = Table::new(["id", "name", "frequency", "tracking", "target", "streak", "status"]);
    for habit in habits {
        table.push([
            habit.id.to_string(),
            habit.name.clone(),
            habit.frequency.to_string(),
            habit.tracking_type.to_string(),
            habit.target_value.to_string(),
            habit.current_streak.to_string(),
            String::from(if habit.is_active { "active" } else { "inactive" }),
        ]);
    }
    table
}

fn logs_table(logs: &[HabitLog]) -> Table {
    let mut table = Table::new(["id", "date", "habit", "value", "status", "notes"]);
    for log in logs {
        table.push([
            log.id.to_string(),
            log.date.to_string(),
            log.habit_name
                .clone()
                .unwrap_or_else(|| format!("#{}", log.habit)),
            log.value.to_string(),
            String::from(if log.completed { "done" } else { "pending" }),
            log.notes.clone(),
        ]);
    }
    table
}
