use daybook_api::Loadable;
use daybook_core::entities::{Reflection, ReflectionStats, ReflectionStreak};
use daybook_core::responses::DeletedResponse;

use super::responses_table;
use crate::cli::GlobalFlags;
use crate::commands::shared::limit::apply_limit;
use crate::commands::shared::parse::parse_date;
use crate::context::AppContext;
use crate::output::{Table, output, output_loadable_table};

pub async fn today(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let result = ctx.require_session()?.today_reflection().await;
    let reflection = Loadable::settle_optional(result, "No reflection found for today.")?;
    output_loadable_table(&reflection, flags.format, responses_table)
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
    let result = ctx.require_session()?.reflections_in_range(from, to).await;
    let reflections = Loadable::settle_list(result, "no reflections in this range")?;
    output_loadable_table(&reflections, flags.format, |reflections: &Vec<Reflection>| {
        reflections_table(reflections)
    })
}

/// Every reflection, newest first, cut to the list limit.
pub async fn all(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let configured = ctx.config.general.default_limit;
    let result = ctx.require_session()?.list_reflections().await;
    let reflections = Loadable::settle_list(result, "no reflections yet")?.map(|mut reflections| {
        reflections.sort_by(|a, b| b.date.cmp(&a.date));
        apply_limit(reflections, flags.limit, configured)
    });
    output_loadable_table(&reflections, flags.format, |reflections: &Vec<Reflection>| {
        reflections_table(reflections)
    })
}

pub async fn delete(date: &str, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let date = parse_date(date, "date")?;
    let client = ctx.require_session()?;
    let Some(reflection) = client.reflection_on(date).await? else {
        anyhow::bail!("no reflection on {date}");
    };
    client.delete_reflection(reflection.id).await?;
    tracing::info!(%date, id = reflection.id, "reflection deleted");
    output(&DeletedResponse::new(reflection.id), flags.format)
}

fn reflections_table(reflections: &[Reflection]) -> Table {
    let mut table = Table::new(["date", "answers", "notes"]);
    for reflection in reflections {
        table.push([
            reflection.date.to_string(),
            reflection.responses.len().to_string(),
            reflection.notes.clone(),
        ]);
    }
    table
}

pub async fn stats(days: Option<u32>, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let days = days.unwrap_or(ctx.config.general.dashboard_days);
    let result = ctx.require_session()?.reflection_stats(days).await;
    let stats = Loadable::settle(result)?;
    output_loadable_table(&stats, flags.format, stats_table)
}

pub async fn streak(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let current_streak = ctx.require_session()?.reflection_streak().await?;
    output(&ReflectionStreak { current_streak }, flags.format)
}

fn stats_table(stats: &ReflectionStats) -> Table {
    let mut table = Table::new(["question", "average", "answers"]);
    table.push([
        format!("{} reflections in {} days", stats.total_reflections, stats.days_analyzed),
        String::new(),
        String::new(),
    ]);
    table.push([
        format!("current streak: {} days", stats.current_streak),
        String::new(),
        String::new(),
    ]);
    for average in &stats.question_averages {
        table.push([
            average.question_text.clone(),
            format!("{:.2}", average.average),
            average.count.to_string(),
        ]);
    }
    table
}
