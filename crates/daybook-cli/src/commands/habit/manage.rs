use daybook_api::Loadable;
use daybook_core::entities::{Habit, HabitDraft, HabitStats};
use daybook_core::enums::{Frequency, TrackingType};
use daybook_core::responses::DeletedResponse;

use super::habits_table;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::habit::{HabitFields, HabitUpdateFields};
use crate::commands::shared::limit::apply_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::{Table, output, output_loadable_table, output_with_table};

pub async fn list(active: bool, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let configured = ctx.config.general.default_limit;
    let client = ctx.require_session()?;
    let result = if active {
        client.active_habits().await
    } else {
        client.list_habits().await
    };
    let habits = Loadable::settle_list(result, "no habits yet")?
        .map(|habits| apply_limit(habits, flags.limit, configured));
    output_loadable_table(&habits, flags.format, |habits: &Vec<Habit>| habits_table(habits))
}

pub async fn create(
    fields: &HabitFields,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let draft = draft_from_fields(fields)?;
    let habit = ctx.require_session()?.create_habit(&draft).await?;
    tracing::info!(id = habit.id, name = %habit.name, "habit created");
    output_with_table(&habit, flags.format, |habit: &Habit| habits_table(std::slice::from_ref(habit)))
}

pub async fn update(
    id: i64,
    fields: &HabitUpdateFields,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = ctx.require_session()?;
    let current = client.get_habit(id).await?;
    let draft = apply_update(HabitDraft::from(&current), fields)?;
    let habit = client.update_habit(id, &draft).await?;
    output_with_table(&habit, flags.format, |habit: &Habit| habits_table(std::slice::from_ref(habit)))
}

pub async fn delete(id: i64, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_session()?.delete_habit(id).await?;
    output(&DeletedResponse::new(id), flags.format)
}

pub async fn toggle(id: i64, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let habit = ctx.require_session()?.toggle_habit(id).await?;
    tracing::info!(id, active = habit.is_active, "habit toggled");
    output_with_table(&habit, flags.format, |habit: &Habit| habits_table(std::slice::from_ref(habit)))
}

pub async fn stats(id: i64, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let result = ctx.require_session()?.habit_stats(id).await;
    let stats = Loadable::settle(result)?;
    output_loadable_table(&stats, flags.format, |stats: &HabitStats| {
        let mut table = Table::new(["metric", "value"]);
        table.push(["logs".to_string(), stats.total_logs.to_string()]);
        table.push(["completed".to_string(), stats.completed_logs.to_string()]);
        table.push(["completion rate".to_string(), format!("{:.1}%", stats.completion_rate)]);
        table.push(["average value".to_string(), format!("{:.2}", stats.average_value)]);
        table.push(["logs, last 30 days".to_string(), stats.last_30_days_logs.to_string()]);
        table
    })
}

fn draft_from_fields(fields: &HabitFields) -> anyhow::Result<HabitDraft> {
    let defaults = HabitDraft::default();
    let draft = HabitDraft {
        name: fields.name.trim().to_string(),
        description: fields.description.clone(),
        frequency: parse_enum::<Frequency>(&fields.frequency, "frequency")?,
        tracking_type: parse_enum::<TrackingType>(&fields.tracking, "tracking")?,
        target_value: fields.target,
        color: fields.color.clone().unwrap_or(defaults.color),
        icon: fields.icon.clone(),
        is_active: true,
    };
    check_draft(&draft)?;
    Ok(draft)
}

fn apply_update(mut draft: HabitDraft, fields: &HabitUpdateFields) -> anyhow::Result<HabitDraft> {
    if let Some(name) = &fields.name {
        draft.name = name.trim().to_string();
    }
    if let Some(description) = &fields.description {
        draft.description.clone_from(description);
    }
    if let Some(frequency) = &fields.frequency {
        draft.frequency = parse_enum(frequency, "frequency")?;
    }
    if let Some(tracking) = &fields.tracking {
        draft.tracking_type = parse_enum(tracking, "tracking")?;
    }
    if let Some(target) = fields.target {
        draft.target_value = target;
    }
    if let Some(color) = &fields.color {
        draft.color.clone_from(color);
    }
    if let Some(icon) = &fields.icon {
        draft.icon.clone_from(icon);
    }
    check_draft(&draft)?;
    Ok(draft)
}

fn check_draft(draft: &HabitDraft) -> anyhow::Result<()> {
    if draft.name.is_empty() {
        anyhow::bail!("habit name must not be empty");
    }
    if draft.target_value == 0 {
        anyhow::bail!("target must be at least 1");
    }
    Ok(())
}
