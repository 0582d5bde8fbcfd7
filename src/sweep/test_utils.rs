//! Scripted in-memory [`NotionApi`] for engine tests.
//!
//! Replies are queued per database (queries) or per page (archives) and
//! popped in order. Every call is recorded with a `tokio::time::Instant` so
//! tests running under a paused clock can assert on pacing.

use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::time::Instant;

use crate::notion::{NotionApi, NotionError, QueryPage};

#[derive(Debug, Clone)]
pub enum QueryReply {
    Page(QueryPage),
    RateLimited,
    Status(u16),
}

#[derive(Debug, Clone, Copy)]
pub enum ArchiveReply {
    Ok,
    RateLimited,
    Status(u16),
}

#[derive(Debug, Clone)]
pub struct QueryCall {
    pub database_id: String,
    pub start_cursor: Option<String>,
    pub at: Instant,
}

#[derive(Debug, Clone)]
pub struct ArchiveCall {
    pub page_id: String,
    pub at: Instant,
}

#[derive(Default)]
pub struct ScriptedNotion {
    queries: Mutex<HashMap<String, VecDeque<QueryReply>>>,
    archives: Mutex<HashMap<String, VecDeque<ArchiveReply>>>,
    query_calls: Mutex<Vec<QueryCall>>,
    archive_calls: Mutex<Vec<ArchiveCall>>,
}

fn status_error(code: u16) -> NotionError {
    NotionError::Request {
        status: StatusCode::from_u16(code).unwrap(),
        body: format!(r#"{{"status":{code}}}"#),
    }
}

/// Split `ids` into result pages of `page_size`, chained with cursors.
pub fn paged(ids: &[&str], page_size: usize) -> Vec<QueryReply> {
    let chunks: Vec<_> = ids.chunks(page_size).collect();
    if chunks.is_empty() {
        return vec![QueryReply::Page(QueryPage::default())];
    }

    let last = chunks.len() - 1;
    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            QueryReply::Page(QueryPage {
                ids: chunk.iter().map(|id| id.to_string()).collect(),
                has_more: i < last,
                next_cursor: (i < last).then(|| format!("cursor-{}", i + 1)),
            })
        })
        .collect()
}

impl ScriptedNotion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query_replies(self, database_id: &str, replies: Vec<QueryReply>) -> Self {
        self.queries
            .lock()
            .unwrap()
            .insert(database_id.to_string(), replies.into());
        self
    }

    pub fn with_archive_replies(self, page_id: &str, replies: Vec<ArchiveReply>) -> Self {
        self.archives
            .lock()
            .unwrap()
            .insert(page_id.to_string(), replies.into());
        self
    }

    pub fn query_calls(&self) -> Vec<QueryCall> {
        self.query_calls.lock().unwrap().clone()
    }

    pub fn archive_calls(&self) -> Vec<ArchiveCall> {
        self.archive_calls.lock().unwrap().clone()
    }

    pub fn archive_attempts(&self, page_id: &str) -> usize {
        self.archive_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.page_id == page_id)
            .count()
    }
}

#[async_trait]
impl NotionApi for ScriptedNotion {
    async fn query_database(
        &self,
        database_id: &str,
        _filter: &serde_json::Value,
        start_cursor: Option<&str>,
    ) -> Result<QueryPage, NotionError> {
        self.query_calls.lock().unwrap().push(QueryCall {
            database_id: database_id.to_string(),
            start_cursor: start_cursor.map(str::to_string),
            at: Instant::now(),
        });

        let reply = self
            .queries
            .lock()
            .unwrap()
            .get_mut(database_id)
            .and_then(VecDeque::pop_front);

        match reply {
            Some(QueryReply::Page(page)) => Ok(page),
            Some(QueryReply::RateLimited) => Err(NotionError::RateLimited { retry_after: None }),
            Some(QueryReply::Status(code)) => Err(status_error(code)),
            None => Ok(QueryPage::default()),
        }
    }

    async fn archive_page(&self, page_id: &str) -> Result<(), NotionError> {
        self.archive_calls.lock().unwrap().push(ArchiveCall {
            page_id: page_id.to_string(),
            at: Instant::now(),
        });

        let reply = self
            .archives
            .lock()
            .unwrap()
            .get_mut(page_id)
            .and_then(VecDeque::pop_front);

        match reply {
            None | Some(ArchiveReply::Ok) => Ok(()),
            Some(ArchiveReply::RateLimited) => Err(NotionError::RateLimited { retry_after: None }),
            Some(ArchiveReply::Status(code)) => Err(status_error(code)),
        }
    }
}
