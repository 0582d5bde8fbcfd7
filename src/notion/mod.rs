//! Notion API boundary.
//!
//! The sweep engine only needs two operations: one page of a filtered
//! database query, and archiving a single page. [`NotionApi`] is the seam the
//! engine is written against; [`NotionClient`] is the HTTP implementation.

mod client;
mod error;
pub mod ids;

use async_trait::async_trait;
pub use client::NotionClient;
pub use error::NotionError;
pub use ids::format_notion_id;

/// One page of database query results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPage {
    /// IDs of the pages on this result page, in response order.
    pub ids: Vec<String>,
    /// Whether Notion reports more results.
    pub has_more: bool,
    /// Cursor for the next page. Absent on the last page.
    pub next_cursor: Option<String>,
}

impl QueryPage {
    /// The cursor to continue with, if pagination should continue.
    ///
    /// Both `has_more` and a cursor are required; a missing cursor ends
    /// pagination even when `has_more` is set.
    pub fn continuation(&self) -> Option<&str> {
        match (self.has_more, self.next_cursor.as_deref()) {
            (true, Some(cursor)) if !cursor.is_empty() => Some(cursor),
            _ => None,
        }
    }
}

#[async_trait]
pub trait NotionApi: Send + Sync {
    /// Fetch one page of results for `filter`, resuming at `start_cursor`.
    async fn query_database(
        &self,
        database_id: &str,
        filter: &serde_json::Value,
        start_cursor: Option<&str>,
    ) -> Result<QueryPage, NotionError>;

    /// Archive (move to trash) a single page.
    async fn archive_page(&self, page_id: &str) -> Result<(), NotionError>;
}
