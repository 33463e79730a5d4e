use clap::{Args, Subcommand};

/// Habit tracker commands.
#[derive(Clone, Debug, Subcommand)]
pub enum HabitCommands {
    /// List habits.
    List {
        /// Only active habits.
        #[arg(long)]
        active: bool,
    },
    /// Create a habit.
    Create(HabitFields),
    /// Update a habit; unset fields keep their value.
    Update {
        id: i64,
        #[command(flatten)]
        fields: HabitUpdateFields,
    },
    /// Delete a habit and its logs.
    Delete { id: i64 },
    /// Activate or deactivate a habit.
    Toggle { id: i64 },
    /// Log progress for today.
    Log {
        id: i64,
        #[arg(long, default_value_t = 1)]
        value: u32,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Change the value or notes of a recorded log.
    LogEdit {
        /// Log id.
        id: i64,
        #[arg(long)]
        value: Option<u32>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a recorded log.
    LogDelete {
        /// Log id.
        id: i64,
    },
    /// Today's logs.
    Today,
    /// Logs filtered by habit and/or day.
    Logs {
        #[arg(long)]
        habit: Option<i64>,
        /// YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
    /// Logs between two days, inclusive.
    Range { from: String, to: String },
    /// Statistics for one habit.
    Stats { id: i64 },
    /// Completion of each active habit for a day.
    Progress {
        /// YYYY-MM-DD, defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Clone, Debug, Args)]
pub struct HabitFields {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// daily, weekly or custom
    #[arg(long, default_value = "daily")]
    pub frequency: String,
    /// boolean or counter
    #[arg(long, default_value = "boolean")]
    pub tracking: String,
    #[arg(long, default_value_t = 1)]
    pub target: u32,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long, default_value = "")]
    pub icon: String,
}

#[derive(Clone, Debug, Args)]
pub struct HabitUpdateFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub frequency: Option<String>,
    #[arg(long)]
    pub tracking: Option<String>,
    #[arg(long)]
    pub target: Option<u32>,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
}
