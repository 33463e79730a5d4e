use chrono::NaiveDate;
use daybook_api::{ApiError, Loadable};
use daybook_core::entities::{Habit, HabitLog};
use daybook_core::habits::LogIndex;
use daybook_core::responses::HabitProgressResponse;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_date;
use crate::context::AppContext;
use crate::output::{Table, bar, output_loadable_table};

/// Completion of every active habit on one day.
pub async fn run(date: Option<&str>, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let day = match date {
        Some(raw) => parse_date(raw, "date")?,
        None => ctx.today(),
    };
    let client = ctx.require_session()?;
    let result = async {
        let habits = client.active_habits().await?;
        let logs = client.list_logs(None, Some(day)).await?;
        Ok::<_, ApiError>(progress_response(&habits, logs, day))
    }
    .await;

    let progress = Loadable::settle(result)?;
    output_loadable_table(&progress, flags.format, progress_table)
}

fn progress_response(habits: &[Habit], logs: Vec<HabitLog>, day: NaiveDate) -> HabitProgressResponse {
    let habits = LogIndex::from_logs(logs).progress_on(habits, day);
    HabitProgressResponse {
        date: day,
        completed: habits.iter().filter(|habit| habit.completed).count(),
        habits,
    }
}

fn progress_table(progress: &HabitProgressResponse) -> Table {
    let mut table = Table::new(["habit", "value", "target", "", "status", "streak"]);
    for habit in &progress.habits {
        table.push([
            habit.name.clone(),
            habit.value.to_string(),
            habit.target_value.to_string(),
            bar(f64::from(habit.percent), 100.0, 20),
            String::from(if habit.completed { "done" } else { "pending" }),
            habit.current_streak.to_string(),
        ]);
    }
    table
}
