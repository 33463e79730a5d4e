use clap::{Args, Subcommand};

/// Self-reflection commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ReflectCommands {
    /// List questions (active ones unless `--all`).
    Questions {
        #[arg(long)]
        all: bool,
        #[arg(long)]
        category: Option<String>,
    },
    /// Add, edit or delete a question.
    Question {
        #[command(subcommand)]
        action: QuestionCommands,
    },
    /// Categories of the active questions.
    Categories,
    /// Today's reflection.
    Today,
    /// Answer the active questions for a day.
    Submit {
        /// `QUESTION_ID=VALUE`; repeat per question.
        #[arg(long = "answer")]
        answers: Vec<String>,
        #[arg(long, default_value = "")]
        notes: String,
        /// YYYY-MM-DD, defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
    /// Reflections between two days, inclusive; all of them without a range.
    History {
        #[arg(requires = "to")]
        from: Option<String>,
        to: Option<String>,
    },
    /// Delete the reflection of a day.
    Delete {
        /// YYYY-MM-DD
        date: String,
    },
    /// Totals and range-question averages.
    Stats {
        #[arg(long)]
        days: Option<u32>,
    },
    /// Consecutive days with a reflection.
    Streak,
}

#[derive(Clone, Debug, Subcommand)]
pub enum QuestionCommands {
    Add(QuestionFields),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: QuestionUpdateFields,
    },
    Delete { id: i64 },
}

#[derive(Clone, Debug, Args)]
pub struct QuestionFields {
    #[arg(long)]
    pub text: String,
    /// range, choice, text or number
    #[arg(long = "type", default_value = "range")]
    pub question_type: String,
    #[arg(long, default_value_t = 1)]
    pub min: i32,
    #[arg(long, default_value_t = 10)]
    pub max: i32,
    /// Option for choice questions; repeat per option.
    #[arg(long = "choice")]
    pub choices: Vec<String>,
    #[arg(long, default_value = "general")]
    pub category: String,
    #[arg(long, default_value_t = 0)]
    pub order: u32,
}

#[derive(Clone, Debug, Args)]
pub struct QuestionUpdateFields {
    #[arg(long)]
    pub text: Option<String>,
    #[arg(long = "type")]
    pub question_type: Option<String>,
    #[arg(long)]
    pub min: Option<i32>,
    #[arg(long)]
    pub max: Option<i32>,
    /// Replaces all options.
    #[arg(long = "choice")]
    pub choices: Vec<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub order: Option<u32>,
    /// true or false
    #[arg(long)]
    pub active: Option<bool>,
}
