use chrono::{DateTime, Utc};
use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::enums::{BlockType, MediaKind};

/// A diary entry with its ordered content blocks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DiaryEntry {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub content_blocks: Vec<ContentBlock>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact list form of an entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DiaryEntrySummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content_blocks_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&DiaryEntry> for DiaryEntrySummary {
    fn from(entry: &DiaryEntry) -> Self {
        Self {
            id: entry.id,
            title: entry.title.clone(),
            content_blocks_count: u32::try_from(entry.content_blocks.len()).unwrap_or(u32::MAX),
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

/// Body for creating or replacing an entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DiaryEntryDraft {
    pub title: String,
    pub content_blocks: Vec<ContentBlock>,
}

// ---------------------------------------------------------------------------
// ContentBlock
// ---------------------------------------------------------------------------

/// The type-dependent payload of a block.
///
/// Text blocks carry text, media blocks carry a media reference (a URL or a
/// base64 data URL). A block can never hold both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    Text { text: String },
    Image { media: String },
    Video { media: String },
}

impl BlockContent {
    #[must_use]
    pub const fn block_type(&self) -> BlockType {
        match self {
            Self::Text { .. } => BlockType::Text,
            Self::Image { .. } => BlockType::Image,
            Self::Video { .. } => BlockType::Video,
        }
    }

    #[must_use]
    pub fn media(kind: MediaKind, media: impl Into<String>) -> Self {
        let media = media.into();
        match kind {
            MediaKind::Image => Self::Image { media },
            MediaKind::Video => Self::Video { media },
        }
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Image { .. } | Self::Video { .. } => None,
        }
    }

    #[must_use]
    pub fn media_ref(&self) -> Option<&str> {
        match self {
            Self::Text { .. } => None,
            Self::Image { media } | Self::Video { media } => Some(media),
        }
    }
}

/// One block inside a diary entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "ContentBlockWire", into = "ContentBlockWire")]
pub struct ContentBlock {
    /// Server id; `None` until the entry is saved.
    pub id: Option<i64>,
    /// Position within the entry, 0-based.
    pub order: u32,
    pub content: BlockContent,
    pub caption: String,
}

impl ContentBlock {
    #[must_use]
    pub const fn block_type(&self) -> BlockType {
        self.content.block_type()
    }
}

/// Flat shape the backend reads and writes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct ContentBlockWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    block_type: BlockType,
    #[serde(default)]
    order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    media_url: Option<String>,
    #[serde(default, skip_serializing)]
    media_file: Option<String>,
    #[serde(default)]
    caption: Option<String>,
}

impl From<ContentBlockWire> for ContentBlock {
    fn from(wire: ContentBlockWire) -> Self {
        let media = || {
            wire.media_url
                .clone()
                .filter(|url| !url.is_empty())
                .or_else(|| wire.media_file.clone())
                .unwrap_or_default()
        };
        let content = match wire.block_type {
            BlockType::Text => BlockContent::Text {
                text: wire.text_content.clone().unwrap_or_default(),
            },
            BlockType::Image => BlockContent::Image { media: media() },
            BlockType::Video => BlockContent::Video { media: media() },
        };
        Self {
            id: wire.id,
            order: wire.order,
            content,
            caption: wire.caption.unwrap_or_default(),
        }
    }
}

impl From<ContentBlock> for ContentBlockWire {
    fn from(block: ContentBlock) -> Self {
        let block_type = block.block_type();
        let (text_content, media_url) = match block.content {
            BlockContent::Text { text } => (Some(text), None),
            BlockContent::Image { media } | BlockContent::Video { media } => (None, Some(media)),
        };
        Self {
            id: block.id,
            block_type,
            order: block.order,
            text_content,
            media_url,
            media_file: None,
            caption: Some(block.caption),
        }
    }
}

impl JsonSchema for ContentBlock {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("ContentBlock")
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        ContentBlockWire::json_schema(generator)
    }
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BlockTypeCount {
    pub block_type: BlockType,
    pub count: u32,
}

/// Aggregates returned by `/api/diary/stats/`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DiaryStats {
    pub total_entries: u32,
    pub entries_this_month: u32,
    pub entries_this_week: u32,
    pub total_blocks: u32,
    #[serde(default)]
    pub block_distribution: Vec<BlockTypeCount>,
}
