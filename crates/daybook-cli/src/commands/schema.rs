use daybook_core::entities::{
    ContentBlock, DashboardStats, DiaryEntry, DiaryEntryDraft, DiaryStats, Habit, HabitDraft,
    HabitLog, HabitStats, QuestionDraft, Reflection, ReflectionQuestion, ReflectionStats,
    ReflectionSubmission,
};
use daybook_core::identity::User;
use daybook_core::responses::{CalendarMonthResponse, HabitProgressResponse, SessionStatusResponse};
use schemars::{Schema, schema_for};

use crate::cli::root_commands::SchemaArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

const TYPE_NAMES: &[&str] = &[
    "calendar-month",
    "content-block",
    "dashboard-stats",
    "diary-entry",
    "diary-entry-draft",
    "diary-stats",
    "habit",
    "habit-draft",
    "habit-log",
    "habit-progress",
    "habit-stats",
    "question",
    "question-draft",
    "reflection",
    "reflection-stats",
    "reflection-submission",
    "session-status",
    "user",
];

/// Handle `dbk schema`. Schemas are JSON in every format except `raw`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_named(&args.type_name)?;
    let format = match flags.format {
        OutputFormat::Raw => OutputFormat::Raw,
        OutputFormat::Json | OutputFormat::Table => OutputFormat::Json,
    };
    output(&schema, format)
}

fn schema_named(name: &str) -> anyhow::Result<Schema> {
    let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
    let schema = match normalized.as_str() {
        "calendar-month" => schema_for!(CalendarMonthResponse),
        "content-block" => schema_for!(ContentBlock),
        "dashboard-stats" => schema_for!(DashboardStats),
        "diary-entry" => schema_for!(DiaryEntry),
        "diary-entry-draft" => schema_for!(DiaryEntryDraft),
        "diary-stats" => schema_for!(DiaryStats),
        "habit" => schema_for!(Habit),
        "habit-draft" => schema_for!(HabitDraft),
        "habit-log" => schema_for!(HabitLog),
        "habit-progress" => schema_for!(HabitProgressResponse),
        "habit-stats" => schema_for!(HabitStats),
        "question" => schema_for!(ReflectionQuestion),
        "question-draft" => schema_for!(QuestionDraft),
        "reflection" => schema_for!(Reflection),
        "reflection-stats" => schema_for!(ReflectionStats),
        "reflection-submission" => schema_for!(ReflectionSubmission),
        "session-status" => schema_for!(SessionStatusResponse),
        "user" => schema_for!(User),
        _ => anyhow::bail!(
            "unknown type '{name}'; expected one of: {}",
            TYPE_NAMES.join(", ")
        ),
    };
    Ok(schema)
}
