use daybook_core::blocks::{BlockEdit, ContentBlockList};
use daybook_core::entities::DiaryEntryDraft;

use super::create::require_title;
use super::get::blocks_table;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::diary::DiaryEditArgs;
use crate::commands::shared::blocks::{append_spec, set_content};
use crate::commands::shared::parse::{parse_assignment, parse_move};
use crate::context::AppContext;
use crate::output::output_with_table;

pub async fn run(args: &DiaryEditArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let title = args.title.as_deref().map(require_title).transpose()?;
    let client = ctx.require_session()?;
    let entry = client.get_entry(args.id).await?;

    let updated = if has_block_ops(args) {
        let blocks = apply_block_ops(ContentBlockList::from_blocks(entry.content_blocks), args)?;
        blocks.validate_for_submit()?;
        let draft = DiaryEntryDraft {
            title: title.unwrap_or(entry.title),
            content_blocks: blocks.into_blocks(),
        };
        client.update_entry(args.id, &draft).await?
    } else if let Some(title) = title {
        client.rename_entry(args.id, &title).await?
    } else {
        anyhow::bail!("nothing to change; pass --title or a block operation");
    };

    tracing::info!(id = updated.id, "entry updated");
    output_with_table(&updated, flags.format, blocks_table)
}

fn has_block_ops(args: &DiaryEditArgs) -> bool {
    !(args.append.is_empty()
        && args.set.is_empty()
        && args.caption.is_empty()
        && args.remove.is_empty()
        && args.moves.is_empty())
}

/// Set, caption, append, remove, move, in that order. Removals run from the
/// highest index down so earlier indices stay valid.
fn apply_block_ops(
    mut blocks: ContentBlockList,
    args: &DiaryEditArgs,
) -> anyhow::Result<ContentBlockList> {
    for raw in &args.set {
        let (index, value) = parse_assignment::<usize>(raw, "--set")?;
        blocks = set_content(blocks, index, &value)?;
    }
    for raw in &args.caption {
        let (index, caption) = parse_assignment::<usize>(raw, "--caption")?;
        blocks = blocks.update(index, BlockEdit::Caption(caption))?;
    }
    for spec in &args.append {
        blocks = append_spec(blocks, spec)?;
    }

    let mut removals = args.remove.clone();
    removals.sort_unstable_by(|a, b| b.cmp(a));
    removals.dedup();
    for index in removals {
        blocks = blocks.remove(index)?;
    }

    for raw in &args.moves {
        let (index, direction) = parse_move(raw)?;
        blocks = blocks.move_block(index, direction)?;
    }
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use daybook_core::errors::CoreError;
    use pretty_assertions::assert_eq;

    use super::*;

    fn args() -> DiaryEditArgs {
        DiaryEditArgs {
            id: 1,
            title: None,
            append: Vec::new(),
            set: Vec::new(),
            caption: Vec::new(),
            remove: Vec::new(),
            moves: Vec::new(),
        }
    }

    fn texts(blocks: &ContentBlockList) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|block| block.content.text())
            .collect()
    }

    fn starting_list() -> ContentBlockList {
        ["text:one", "text:two", "text:three"]
            .iter()
            .try_fold(ContentBlockList::new(), |list, spec| append_spec(list, spec))
            .expect("blocks")
    }

    #[test]
    fn title_only_edit_has_no_block_ops() {
        let mut edit = args();
        edit.title = Some("New".into());
        assert!(!has_block_ops(&edit));
        edit.remove = vec![0];
        assert!(has_block_ops(&edit));
    }

    #[test]
    fn operations_apply_in_documented_order() {
        let mut edit = args();
        edit.set = vec!["0=uno".into()];
        edit.append = vec!["text:four".into()];
        edit.remove = vec![1, 2];
        edit.moves = vec!["1:up".into()];

        let blocks = apply_block_ops(starting_list(), &edit).expect("apply");
        assert_eq!(texts(&blocks), ["four", "uno"]);
        let orders: Vec<u32> = blocks.iter().map(|block| block.order).collect();
        assert_eq!(orders, [0, 1]);
    }

    #[test]
    fn duplicate_removals_remove_once() {
        let mut edit = args();
        edit.remove = vec![0, 0];
        let blocks = apply_block_ops(starting_list(), &edit).expect("apply");
        assert_eq!(texts(&blocks), ["two", "three"]);
    }

    #[test]
    fn captions_attach_to_blocks() {
        let mut edit = args();
        edit.caption = vec!["2=the end".into()];
        let blocks = apply_block_ops(starting_list(), &edit).expect("apply");
        assert_eq!(blocks.get(2).map(|block| block.caption.as_str()), Some("the end"));
    }

    #[test]
    fn bad_index_is_reported() {
        let mut edit = args();
        edit.remove = vec![5];
        let err = apply_block_ops(starting_list(), &edit).expect_err("out of range");
        assert_eq!(
            err.downcast_ref::<CoreError>(),
            Some(&CoreError::BlockIndexOutOfRange { index: 5, len: 3 })
        );
    }
}
