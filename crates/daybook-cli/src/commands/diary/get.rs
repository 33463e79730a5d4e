use daybook_api::Loadable;
use daybook_core::entities::{BlockContent, DiaryEntry};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::{Table, output_loadable_table};

pub async fn run(id: i64, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let result = ctx.require_session()?.get_entry(id).await;
    let entry = Loadable::settle(result)?;

    output_loadable_table(&entry, flags.format, |entry: &DiaryEntry| {
        println!("#{} {}", entry.id, entry.title);
        blocks_table(entry)
    })
}

pub(super) fn blocks_table(entry: &DiaryEntry) -> Table {
    let mut table = Table::new(["#", "type", "content", "caption"]);
    for block in &entry.content_blocks {
        let content = match &block.content {
            BlockContent::Text { text } => text.clone(),
            BlockContent::Image { media } | BlockContent::Video { media } => media_label(media),
        };
        table.push([
            block.order.to_string(),
            block.block_type().to_string(),
            content,
            block.caption.clone(),
        ]);
    }
    table
}

/// Inline media is shown by type and size, not by payload.
fn media_label(media: &str) -> String {
    match media.strip_prefix("data:") {
        Some(rest) => {
            let mime = rest.split(';').next().unwrap_or_default();
            format!("[inline {mime}, {} bytes]", media.len())
        }
        None => media.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_media_is_summarized() {
        assert_eq!(
            media_label("data:image/png;base64,cG5n"),
            "[inline image/png, 26 bytes]"
        );
        assert_eq!(media_label("https://cdn/x.jpg"), "https://cdn/x.jpg");
    }
}
