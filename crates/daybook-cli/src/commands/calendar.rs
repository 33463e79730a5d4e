use chrono::{Datelike, TimeZone};
use daybook_api::Loadable;
use daybook_core::calendar::{MonthCursor, group_by_day, month_counts};
use daybook_core::entities::DiaryEntry;
use daybook_core::responses::{CalendarDay, CalendarMonthResponse};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CalendarArgs;
use crate::context::AppContext;
use crate::output::{Table, bar, output_loadable_table};

/// Handle `dbk calendar`.
pub async fn handle(
    args: &CalendarArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let month = match &args.month {
        Some(raw) => raw.parse::<MonthCursor>()?,
        None => MonthCursor::containing(ctx.today()),
    };
    let time_zone = ctx.time_zone;
    let result = ctx.require_session()?.list_entries().await;
    let calendar = Loadable::settle(result)?
        .map(|entries| month_response(&entries, &time_zone, month));

    output_loadable_table(&calendar, flags.format, |calendar: &CalendarMonthResponse| {
        if calendar.days.is_empty() {
            println!("no entries in {}", calendar.month);
        }
        calendar_table(calendar)
    })
}

fn month_response<Tz: TimeZone>(
    entries: &[DiaryEntry],
    time_zone: &Tz,
    month: MonthCursor,
) -> CalendarMonthResponse {
    let grouped = group_by_day(entries, time_zone);
    let days: Vec<CalendarDay> = month_counts(&grouped, month)
        .into_iter()
        .map(|(date, entries)| CalendarDay { date, entries })
        .collect();
    CalendarMonthResponse {
        month: month.to_string(),
        total_entries: days.iter().map(|day| day.entries).sum(),
        days,
    }
}

#[allow(clippy::cast_precision_loss)]
fn calendar_table(calendar: &CalendarMonthResponse) -> Table {
    let busiest = calendar.days.iter().map(|day| day.entries).max().unwrap_or(0);
    let mut table = Table::new(["date", "day", "entries", ""]);
    for day in &calendar.days {
        table.push([
            day.date.to_string(),
            day.date.weekday().to_string(),
            day.entries.to_string(),
            bar(day.entries as f64, busiest as f64, 20),
        ]);
    }
    table
}
