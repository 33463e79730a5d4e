use clap::{Args, Subcommand};

use crate::cli::subcommands::{AuthCommands, DiaryCommands, HabitCommands, ReflectCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out and account management.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Diary entries and their content blocks.
    Diary {
        #[command(subcommand)]
        action: DiaryCommands,
    },
    /// Per-day entry counts for one month.
    Calendar(CalendarArgs),
    /// Habits and daily logs.
    Habit {
        #[command(subcommand)]
        action: HabitCommands,
    },
    /// Daily self-reflection questions and answers.
    Reflect {
        #[command(subcommand)]
        action: ReflectCommands,
    },
    /// Reflection charts as tables.
    Dashboard(DashboardArgs),
    /// Quote of the day.
    Quote,
    /// A random background image.
    Image(ImageArgs),
    /// Print the JSON schema of an entity.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct CalendarArgs {
    /// Month as YYYY-MM (defaults to the current month).
    #[arg(long)]
    pub month: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct DashboardArgs {
    /// Days to cover (defaults to `general.dashboard_days`).
    #[arg(long)]
    pub days: Option<u32>,
    /// Only this question.
    #[arg(long)]
    pub question: Option<i64>,
}

#[derive(Clone, Debug, Args)]
pub struct ImageArgs {
    /// Open the image in the default browser.
    #[arg(long)]
    pub open: bool,
    /// Search this category instead of the rotation.
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Entity name, e.g. `diary-entry`, `habit`, `reflection`.
    pub type_name: String,
}
