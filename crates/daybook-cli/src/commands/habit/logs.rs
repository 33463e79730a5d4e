use daybook_api::Loadable;
use daybook_core::entities::{HabitLog, HabitLogUpdate, QuickLog};
use daybook_core::responses::DeletedResponse;

use super::logs_table;
use crate::cli::GlobalFlags;
use crate::commands::shared::limit::apply_limit;
use crate::commands::shared::parse::parse_date;
use crate::context::AppContext;
use crate::output::{output, output_loadable_table, output_with_table};

/// Boolean habits take the value as given; counter habits add it to today's
/// total.
pub async fn log(
    id: i64,
    value: u32,
    notes: Option<&str>,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let body = QuickLog {
        habit_id: id,
        value,
        notes: notes.unwrap_or_default().to_string(),
    };
    let log = ctx.require_session()?.log_habit(&body).await?;
    tracing::info!(habit = id, value = log.value, completed = log.completed, "habit logged");
    output_with_table(&log, flags.format, |log: &HabitLog| logs_table(std::slice::from_ref(log)))
}

pub async fn edit(
    id: i64,
    value: Option<u32>,
    notes: Option<String>,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if value.is_none() && notes.is_none() {
        anyhow::bail!("nothing to change; pass --value or --notes");
    }
    let update = HabitLogUpdate { value, notes };
    let log = ctx.require_session()?.update_log(id, &update).await?;
    output_with_table(&log, flags.format, |log: &HabitLog| logs_table(std::slice::from_ref(log)))
}

pub async fn delete(id: i64, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_session()?.delete_log(id).await?;
    output(&DeletedResponse::new(id), flags.format)
}

pub async fn today(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let result = ctx.require_session()?.today_logs().await;
    let logs = Loadable::settle_list(result, "nothing logged today")?;
    output_loadable_table(&logs, flags.format, |logs: &Vec<HabitLog>| logs_table(logs))
}

pub async fn filtered(
    habit: Option<i64>,
    date: Option<&str>,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let date = date.map(|raw| parse_date(raw, "date")).transpose()?;
    let configured = ctx.config.general.default_limit;
    let result = ctx.require_session()?.list_logs(habit, date).await;
    let logs = Loadable::settle_list(result, "no matching logs")?
        .map(|logs| apply_limit(logs, flags.limit, configured));
    output_loadable_table(&logs, flags.format, |logs: &Vec<HabitLog>| logs_table(logs))
}

pub async fn range(
    from: &str,
    to: &str,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let from = parse_date(from, "from")?;
    let to = parse_date(to, "to")?;
    if from > to {
        anyhow::bail!("range start {from} is after its end {to}");
    }
    let result = ctx.require_session()?.logs_in_range(from, to).await;
    let logs = Loadable::settle_list(result, "no logs in this range")?;
    output_loadable_table(&logs, flags.format, |logs: &Vec<HabitLog>| logs_table(logs))
}
