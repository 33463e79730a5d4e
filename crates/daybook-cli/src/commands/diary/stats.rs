use daybook_api::Loadable;
use daybook_core::entities::DiaryStats;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::{Table, bar, output_loadable_table};

pub async fn run(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let result = ctx.require_session()?.diary_stats().await;
    let stats = Loadable::settle(result)?;
    output_loadable_table(&stats, flags.format, stats_table)
}

fn stats_table(stats: &DiaryStats) -> Table {
    let mut table = Table::new(["metric", "value", ""]);
    for (metric, value) in [
        ("entries", stats.total_entries),
        ("this month", stats.entries_this_month),
        ("this week", stats.entries_this_week),
        ("blocks", stats.total_blocks),
    ] {
        table.push([metric.to_string(), value.to_string(), String::new()]);
    }
    let total = f64::from(stats.total_blocks.max(1));
    for bucket in &stats.block_distribution {
        table.push([
            format!("{} blocks", bucket.block_type),
            bucket.count.to_string(),
            bar(f64::from(bucket.count), total, 20),
        ]);
    }
    table
}
