use daybook_core::blocks::ContentBlockList;
use daybook_core::entities::DiaryEntryDraft;

use super::get::blocks_table;
use crate::cli::GlobalFlags;
use crate::commands::shared::blocks::append_spec;
use crate::context::AppContext;
use crate::output::output_with_table;
use crate::progress::Progress;

pub async fn run(
    title: &str,
    specs: &[String],
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let title = require_title(title)?;
    let blocks = specs
        .iter()
        .try_fold(ContentBlockList::new(), |list, spec| append_spec(list, spec))?;
    blocks.validate_for_submit()?;

    let draft = DiaryEntryDraft {
        title,
        content_blocks: blocks.into_blocks(),
    };
    let client = ctx.require_session()?;
    let progress = Progress::spinner("saving entry");
    let created = client.create_entry(&draft).await;
    progress.finish_clear();
    let created = created?;

    tracing::info!(id = created.id, blocks = created.content_blocks.len(), "entry created");
    output_with_table(&created, flags.format, blocks_table)
}

pub(super) fn require_title(title: &str) -> anyhow::Result<String> {
    let title = title.trim();
    if title.is_empty() {
        anyhow::bail!("title must not be empty");
    }
    Ok(title.to_string())
}
