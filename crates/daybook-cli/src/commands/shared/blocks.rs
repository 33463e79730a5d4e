//! Block specs given on the command line: `text:CONTENT`, `image:PATH`,
//! `video:PATH`.

use std::path::Path;

use anyhow::Context;
use daybook_core::blocks::{BlockEdit, ContentBlockList, DataUrl, NewBlock, media_kind_for_path};
use daybook_core::enums::{BlockType, MediaKind};

/// Append the block described by `spec`.
pub fn append_spec(list: ContentBlockList, spec: &str) -> anyhow::Result<ContentBlockList> {
    let (kind, value) = spec
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("invalid block '{spec}' (expected KIND:VALUE)"))?;

    match kind.trim().to_ascii_lowercase().as_str() {
        "text" => {
            let list = list.append(NewBlock::Text);
            let index = list.len() - 1;
            Ok(list.update(index, BlockEdit::Text(value.to_string()))?)
        }
        "image" => Ok(list.append(NewBlock::Media {
            kind: MediaKind::Image,
            data: encode_media(Path::new(value), MediaKind::Image)?,
        })),
        "video" => Ok(list.append(NewBlock::Media {
            kind: MediaKind::Video,
            data: encode_media(Path::new(value), MediaKind::Video)?,
        })),
        other => anyhow::bail!("invalid block kind '{other}' (expected text, image or video)"),
    }
}

/// Replace the content of the block at `index`: text for text blocks, a
/// file path or URL for media blocks.
pub fn set_content(
    list: ContentBlockList,
    index: usize,
    value: &str,
) -> anyhow::Result<ContentBlockList> {
    let Some(block) = list.get(index) else {
        return Ok(list.update(index, BlockEdit::Text(value.to_string()))?);
    };
    let edit = match block.content.block_type() {
        BlockType::Text => BlockEdit::Text(value.to_string()),
        BlockType::Image => BlockEdit::Media(media_reference(value, MediaKind::Image)?),
        BlockType::Video => BlockEdit::Media(media_reference(value, MediaKind::Video)?),
    };
    Ok(list.update(index, edit)?)
}

/// URLs and data URLs are kept as they are; anything else is read as a file.
fn media_reference(value: &str, kind: MediaKind) -> anyhow::Result<String> {
    let trimmed = value.trim();
    if ["http://", "https://", "data:"]
        .iter()
        .any(|scheme| trimmed.starts_with(scheme))
    {
        return Ok(trimmed.to_string());
    }
    Ok(encode_media(Path::new(trimmed), kind)?.into_string())
}

fn encode_media(path: &Path, kind: MediaKind) -> anyhow::Result<DataUrl> {
    match media_kind_for_path(path) {
        Some(found) if found == kind => {}
        Some(found) => anyhow::bail!("{} is a {found} file, not a {kind}", path.display()),
        None => anyhow::bail!("{} is not a supported {kind} file", path.display()),
    }
    DataUrl::from_path(path).with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use daybook_core::entities::BlockContent;
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_png(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("photo.png");
        std::fs::write(&path, b"png").expect("write");
        path
    }

    #[test]
    fn text_spec_keeps_everything_after_the_first_colon() {
        let list = append_spec(ContentBlockList::new(), "text:Dear diary: today").expect("append");
        assert_eq!(list.len(), 1);
        assert_eq!(
            list.get(0).and_then(|block| block.content.text()),
            Some("Dear diary: today")
        );
    }

    #[test]
    fn image_spec_inlines_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_png(&dir);
        let list = append_spec(ContentBlockList::new(), &format!("image:{}", path.display()))
            .expect("append");
        assert_eq!(
            list.get(0).map(|block| &block.content),
            Some(&BlockContent::Image {
                media: "data:image/png;base64,cG5n".into()
            })
        );
    }

    #[test]
    fn media_kind_must_match_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_png(&dir);
        let err = append_spec(ContentBlockList::new(), &format!("video:{}", path.display()))
            .expect_err("png is not a video");
        assert!(err.to_string().contains("is a image file, not a video"));
    }

    #[test]
    fn unknown_kind_and_missing_separator_are_rejected() {
        assert!(append_spec(ContentBlockList::new(), "audio:song.mp3").is_err());
        assert!(append_spec(ContentBlockList::new(), "just text").is_err());
    }

    #[test]
    fn set_on_media_accepts_urls_verbatim() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_png(&dir);
        let list = append_spec(ContentBlockList::new(), &format!("image:{}", path.display()))
            .expect("append");
        let list = set_content(list, 0, "https://example.com/a.jpg").expect("set");
        assert_eq!(
            list.get(0).and_then(|block| block.content.media_ref()),
            Some("https://example.com/a.jpg")
        );
    }

    #[test]
    fn set_on_missing_index_reports_the_range() {
        let err = set_content(ContentBlockList::new(), 3, "x").expect_err("out of range");
        assert!(err.to_string().contains("block index 3 out of range"));
    }
}
