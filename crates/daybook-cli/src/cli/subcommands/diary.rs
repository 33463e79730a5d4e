use clap::{Args, Subcommand};

/// Diary commands.
///
/// Block specs are `text:CONTENT`, `image:PATH` or `video:PATH`.
#[derive(Clone, Debug, Subcommand)]
pub enum DiaryCommands {
    /// List entries, newest first.
    List {
        /// Only entries created on this day (YYYY-MM-DD).
        #[arg(long)]
        date: Option<String>,
    },
    /// Show one entry with its blocks.
    Get { id: i64 },
    /// Create an entry.
    Create {
        #[arg(long)]
        title: String,
        /// Block spec; repeat for more blocks.
        #[arg(long = "block")]
        blocks: Vec<String>,
    },
    /// Edit an entry's title and blocks.
    Edit(DiaryEditArgs),
    /// Delete an entry.
    Delete { id: i64 },
    /// Totals and block distribution.
    Stats,
}

/// Block operations apply in this order: set, caption, append, remove, move.
#[derive(Clone, Debug, Args)]
pub struct DiaryEditArgs {
    pub id: i64,
    #[arg(long)]
    pub title: Option<String>,
    /// Block spec to append.
    #[arg(long)]
    pub append: Vec<String>,
    /// `INDEX=TEXT` for text blocks, `INDEX=PATH` for media blocks.
    #[arg(long)]
    pub set: Vec<String>,
    /// `INDEX=CAPTION`.
    #[arg(long)]
    pub caption: Vec<String>,
    /// Block index to remove.
    #[arg(long)]
    pub remove: Vec<usize>,
    /// `INDEX:up` or `INDEX:down`.
    #[arg(long = "move")]
    pub moves: Vec<String>,
}
