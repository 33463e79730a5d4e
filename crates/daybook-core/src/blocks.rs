//! Ordered, typed content-block list used when composing diary entries.
//!
//! Every mutation consumes the list and returns the new one. After each
//! mutation `blocks[i].order == i` holds for every block.

use std::fmt;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::entities::{BlockContent, ContentBlock};
use crate::enums::{BlockType, MediaKind};
use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// DataUrl
// ---------------------------------------------------------------------------

/// A `data:<mime>;base64,<payload>` reference holding a media file inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl(String);

impl DataUrl {
    #[must_use]
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
    }

    /// Read a file and encode it, inferring the MIME type from its extension.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be read.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let mime = mime_for_path(path).unwrap_or("application/octet-stream");
        Ok(Self::from_bytes(mime, &bytes))
    }

    /// The declared MIME type.
    #[must_use]
    pub fn mime(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const MIME_TYPES: &[(&str, &str, MediaKind)] = &[
    ("png", "image/png", MediaKind::Image),
    ("jpg", "image/jpeg", MediaKind::Image),
    ("jpeg", "image/jpeg", MediaKind::Image),
    ("gif", "image/gif", MediaKind::Image),
    ("webp", "image/webp", MediaKind::Image),
    ("svg", "image/svg+xml", MediaKind::Image),
    ("mp4", "video/mp4", MediaKind::Video),
    ("webm", "video/webm", MediaKind::Video),
    ("mov", "video/quicktime", MediaKind::Video),
    ("ogv", "video/ogg", MediaKind::Video),
];

fn lookup(path: &Path) -> Option<&'static (&'static str, &'static str, MediaKind)> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    MIME_TYPES.iter().find(|(known, _, _)| *known == ext)
}

/// MIME type for a media file, by extension.
#[must_use]
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    lookup(path).map(|(_, mime, _)| *mime)
}

/// Whether a file is an image or a video, by extension.
#[must_use]
pub fn media_kind_for_path(path: &Path) -> Option<MediaKind> {
    lookup(path).map(|(_, _, kind)| *kind)
}

// ---------------------------------------------------------------------------
// Edit operations
// ---------------------------------------------------------------------------

/// A block to append.
///
/// Media blocks can only be built from an already-encoded [`DataUrl`], so a
/// media block never enters the list before its payload is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewBlock {
    Text,
    Media { kind: MediaKind, data: DataUrl },
}

/// A single-field replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockEdit {
    Text(String),
    /// New media reference: a URL or a data URL.
    Media(String),
    Caption(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

// ---------------------------------------------------------------------------
// ContentBlockList
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentBlockList {
    blocks: Vec<ContentBlock>,
}

impl ContentBlockList {
    #[must_use]
    pub const fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Adopt blocks fetched from the server, ordered by their `order` field.
    #[must_use]
    pub fn from_blocks(mut blocks: Vec<ContentBlock>) -> Self {
        blocks.sort_by_key(|block| block.order);
        Self { blocks }.renumbered()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ContentBlock> {
        self.blocks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContentBlock> {
        self.blocks.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ContentBlock] {
        &self.blocks
    }

    #[must_use]
    pub fn into_blocks(self) -> Vec<ContentBlock> {
        self.blocks
    }

    /// Add a block at the end with `order = len`.
    #[must_use]
    pub fn append(mut self, block: NewBlock) -> Self {
        let content = match block {
            NewBlock::Text => BlockContent::Text {
                text: String::new(),
            },
            NewBlock::Media { kind, data } => BlockContent::media(kind, data.into_string()),
        };
        self.blocks.push(ContentBlock {
            id: None,
            order: order_of(self.blocks.len()),
            content,
            caption: String::new(),
        });
        self
    }

    /// Replace one field of the block at `index`. `order` is untouched.
    ///
    /// # Errors
    ///
    /// [`CoreError::BlockIndexOutOfRange`] for a bad index,
    /// [`CoreError::FieldMismatch`] when the field does not belong to the
    /// block's type.
    pub fn update(mut self, index: usize, edit: BlockEdit) -> Result<Self, CoreError> {
        let len = self.blocks.len();
        let block = self
            .blocks
            .get_mut(index)
            .ok_or(CoreError::BlockIndexOutOfRange { index, len })?;

        match (edit, &mut block.content) {
            (BlockEdit::Caption(caption), _) => block.caption = caption,
            (BlockEdit::Text(value), BlockContent::Text { text }) => *text = value,
            (
                BlockEdit::Media(value),
                BlockContent::Image { media } | BlockContent::Video { media },
            ) => *media = value,
            (BlockEdit::Text(_), content) => {
                return Err(mismatch(index, content.block_type(), "text_content"));
            }
            (BlockEdit::Media(_), content) => {
                return Err(mismatch(index, content.block_type(), "media_url"));
            }
        }
        Ok(self)
    }

    /// Delete the block at `index` and renumber the rest.
    ///
    /// # Errors
    ///
    /// [`CoreError::BlockIndexOutOfRange`] for a bad index.
    pub fn remove(mut self, index: usize) -> Result<Self, CoreError> {
        self.check_index(index)?;
        self.blocks.remove(index);
        Ok(self.renumbered())
    }

    /// Swap the block at `index` with its neighbor in `direction`.
    ///
    /// Moving the first block up or the last block down leaves the list as
    /// it is.
    ///
    /// # Errors
    ///
    /// [`CoreError::BlockIndexOutOfRange`] for a bad index.
    pub fn move_block(mut self, index: usize, direction: Direction) -> Result<Self, CoreError> {
        self.check_index(index)?;
        let neighbor = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|next| *next < self.blocks.len()),
        };
        if let Some(neighbor) = neighbor {
            self.blocks.swap(index, neighbor);
        }
        Ok(self.renumbered())
    }

    /// Client-side gate before saving: text blocks need text, media blocks
    /// need a media reference.
    ///
    /// # Errors
    ///
    /// The first offending block, as [`CoreError::EmptyTextBlock`] or
    /// [`CoreError::MissingMedia`].
    pub fn validate_for_submit(&self) -> Result<(), CoreError> {
        for (index, block) in self.blocks.iter().enumerate() {
            match &block.content {
                BlockContent::Text { text } if text.trim().is_empty() => {
                    return Err(CoreError::EmptyTextBlock { index });
                }
                BlockContent::Image { media } | BlockContent::Video { media }
                    if media.trim().is_empty() =>
                {
                    return Err(CoreError::MissingMedia {
                        index,
                        block_type: block.block_type().to_string(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), CoreError> {
        if index < self.blocks.len() {
            Ok(())
        } else {
            Err(CoreError::BlockIndexOutOfRange {
                index,
                len: self.blocks.len(),
            })
        }
    }

    fn renumbered(mut self) -> Self {
        for (index, block) in self.blocks.iter_mut().enumerate() {
            block.order = order_of(index);
        }
        self
    }
}

impl From<ContentBlockList> for Vec<ContentBlock> {
    fn from(list: ContentBlockList) -> Self {
        list.blocks
    }
}

impl<'a> IntoIterator for &'a ContentBlockList {
    type Item = &'a ContentBlock;
    type IntoIter = std::slice::Iter<'a, ContentBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

fn order_of(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

fn mismatch(index: usize, block_type: BlockType, field: &'static str) -> CoreError {
    CoreError::FieldMismatch {
        index,
        block_type: block_type.to_string(),
        field,
    }
}
