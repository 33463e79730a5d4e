mod create;
mod edit;
mod get;
mod list;
mod stats;

use daybook_core::responses::DeletedResponse;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DiaryCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `dbk diary <subcommand>`.
pub async fn handle(
    action: &DiaryCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DiaryCommands::List { date } => list::run(date.as_deref(), ctx, flags).await,
        DiaryCommands::Get { id } => get::run(*id, ctx, flags).await,
        DiaryCommands::Create { title, blocks } => create::run(title, blocks, ctx, flags).await,
        DiaryCommands::Edit(args) => edit::run(args, ctx, flags).await,
        DiaryCommands::Delete { id } => {
            ctx.require_session()?.delete_entry(*id).await?;
            output(&DeletedResponse::new(*id), flags.format)
        }
        DiaryCommands::Stats => stats::run(ctx, flags).await,
    }
}

/// One-line preview of an entry's first text block.
fn preview(entry: &daybook_core::entities::DiaryEntry, width: usize) -> String {
    let text = entry
        .content_blocks
        .iter()
        .find_map(|block| block.content.text())
        .unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if text.chars().count() > width {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    } else {
        text
    }
}
