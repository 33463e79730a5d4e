//! Diary endpoints under `/api/diary/`.

use chrono::NaiveDate;
use daybook_core::entities::{ContentBlock, DiaryEntry, DiaryEntryDraft, DiaryStats, Listing};
use serde_json::json;

use crate::client::DaybookClient;
use crate::error::ApiError;
use crate::http::with_query;

const ENTRIES: &str = "/api/diary/entries/";

fn entry_path(id: i64) -> String {
    format!("{ENTRIES}{id}/")
}

fn blocks_path(entry_id: i64) -> String {
    format!("{ENTRIES}{entry_id}/blocks/")
}

fn block_path(entry_id: i64, block_id: i64) -> String {
    format!("{ENTRIES}{entry_id}/blocks/{block_id}/")
}

impl DaybookClient {
    /// All entries of the signed-in user, newest first.
    ///
    /// # Errors
    ///
    /// Transport, status and session errors as [`ApiError`].
    pub async fn list_entries(&mut self) -> Result<Vec<DiaryEntry>, ApiError> {
        let listing: Listing<DiaryEntry> = self.get_json(ENTRIES).await?;
        Ok(listing.into_items())
    }

    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown or foreign entry.
    pub async fn get_entry(&mut self, id: i64) -> Result<DiaryEntry, ApiError> {
        self.get_json(&entry_path(id)).await
    }

    /// Entries whose creation date (server time zone) is `date`.
    ///
    /// # Errors
    ///
    /// Transport, status and session errors as [`ApiError`].
    pub async fn entries_by_date(&mut self, date: NaiveDate) -> Result<Vec<DiaryEntry>, ApiError> {
        let path = with_query(
            &format!("{ENTRIES}by-date/"),
            &[("date", Some(date.format("%Y-%m-%d").to_string()))],
        );
        let listing: Listing<DiaryEntry> = self.get_json(&path).await?;
        Ok(listing.into_items())
    }

    /// Create an entry together with its blocks.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] when the backend refuses a block.
    pub async fn create_entry(&mut self, draft: &DiaryEntryDraft) -> Result<DiaryEntry, ApiError> {
        let entry: DiaryEntry = self.post_json(ENTRIES, draft).await?;
        tracing::debug!(id = entry.id, blocks = entry.content_blocks.len(), "entry created");
        Ok(entry)
    }

    /// Replace the title and the whole block list of an entry.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] or [`ApiError::Validation`].
    pub async fn update_entry(
        &mut self,
        id: i64,
        draft: &DiaryEntryDraft,
    ) -> Result<DiaryEntry, ApiError> {
        self.put_json(&entry_path(id), draft).await
    }

    /// Change only the title.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] or [`ApiError::Validation`].
    pub async fn rename_entry(&mut self, id: i64, title: &str) -> Result<DiaryEntry, ApiError> {
        self.patch_json(&entry_path(id), &json!({ "title": title }))
            .await
    }

    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown or foreign entry.
    pub async fn delete_entry(&mut self, id: i64) -> Result<(), ApiError> {
        self.delete(&entry_path(id)).await
    }

    /// # Errors
    ///
    /// Transport, status and session errors as [`ApiError`].
    pub async fn diary_stats(&mut self) -> Result<DiaryStats, ApiError> {
        self.get_json("/api/diary/stats/").await
    }

    // -----------------------------------------------------------------------
    // Blocks
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown or foreign entry.
    pub async fn list_blocks(&mut self, entry_id: i64) -> Result<Vec<ContentBlock>, ApiError> {
        let listing: Listing<ContentBlock> = self.get_json(&blocks_path(entry_id)).await?;
        let mut blocks = listing.into_items();
        blocks.sort_by_key(|block| block.order);
        Ok(blocks)
    }

    /// Add one block to an existing entry. The block's `order` is sent as is.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] when the block content is refused.
    pub async fn add_block(
        &mut self,
        entry_id: i64,
        block: &ContentBlock,
    ) -> Result<ContentBlock, ApiError> {
        self.post_json(&blocks_path(entry_id), block).await
    }

    /// # Errors
    ///
    /// [`ApiError::NotFound`] or [`ApiError::Validation`].
    pub async fn update_block(
        &mut self,
        entry_id: i64,
        block_id: i64,
        block: &ContentBlock,
    ) -> Result<ContentBlock, ApiError> {
        self.put_json(&block_path(entry_id, block_id), block).await
    }

    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown block.
    pub async fn delete_block(&mut self, entry_id: i64, block_id: i64) -> Result<(), ApiError> {
        self.delete(&block_path(entry_id, block_id)).await
    }
}
