use daybook_api::Loadable;
use daybook_core::entities::{ChoiceChart, DashboardStats, LineChart, QuestionDashboard, SeriesChart};

use crate::cli::root_commands::DashboardArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::{Table, bar, output_loadable, print_table};

const BAR_WIDTH: usize = 20;

/// Handle `dbk dashboard`.
pub async fn handle(
    args: &DashboardArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let days = args.days.unwrap_or(ctx.config.general.dashboard_days);
    let result = ctx.require_session()?.dashboard_stats(days, args.question).await;
    let stats = Loadable::settle(result)?;

    match (&stats, flags.format) {
        (Loadable::Loaded(stats), OutputFormat::Table) => {
            print_dashboard(stats);
            Ok(())
        }
        _ => output_loadable(&stats, flags.format),
    }
}

fn print_dashboard(stats: &DashboardStats) {
    let overview = &stats.overview;
    println!(
        "{} to {}: {} reflections over {} days, streak {}",
        overview.start_date,
        overview.end_date,
        overview.total_reflections,
        overview.days_analyzed,
        overview.current_streak
    );
    if stats.questions.is_empty() {
        println!("no questions to chart");
    }
    for question in &stats.questions {
        println!();
        println!("{} ({})", question.question_text, question.question_type);
        for table in question_tables(question) {
            print_table(&table);
        }
    }
}

/// The line chart first, then the answer distribution.
fn question_tables(question: &QuestionDashboard) -> Vec<Table> {
    let mut tables = Vec::new();
    match &question.line_chart {
        Some(LineChart::Series(series)) => tables.push(series_table(series)),
        Some(LineChart::Choices(choices)) => tables.push(choices_table(choices)),
        None => {}
    }
    if let Some(distribution) = &question.distribution {
        let mut table = Table::new(["answer", "count", "share", ""]);
        for (answer, bucket) in distribution {
            table.push([
                answer.clone(),
                bucket.count.to_string(),
                format!("{:.1}%", bucket.percentage),
                bar(bucket.percentage, 100.0, BAR_WIDTH),
            ]);
        }
        tables.push(table);
    }
    tables
}

fn series_table(series: &SeriesChart) -> Table {
    let max = series.statistics.max.unwrap_or(0.0);
    let mut table = Table::new(["date", "value", ""]);
    for point in &series.data {
        table.push([
            point.date.to_string(),
            point.value.map_or_else(|| String::from("-"), |value| format!("{value}")),
            point
                .value
                .map(|value| bar(value, max, BAR_WIDTH))
                .unwrap_or_default(),
        ]);
    }
    if let Some(average) = series.statistics.average {
        table.push([
            String::from("average"),
            format!("{average:.2}"),
            format!("{} answers", series.statistics.count),
        ]);
    }
    table
}

fn choices_table(choices: &ChoiceChart) -> Table {
    let total = f64::from(choices.total_responses.max(1));
    let mut table = Table::new(["choice", "days", ""]);
    for dataset in &choices.datasets {
        let selected = dataset.data.iter().filter(|point| point.selected).count();
        let selected = u32::try_from(selected).unwrap_or(u32::MAX);
        table.push([
            dataset.label.clone(),
            selected.to_string(),
            bar(f64::from(selected), total, BAR_WIDTH),
        ]);
    }
    table
}
