use std::time::Duration;

use reqwest::StatusCode;

/// Errors returned by the Notion API boundary.
#[derive(Debug, thiserror::Error)]
pub enum NotionError {
    /// HTTP 429. The only error the archive path retries.
    #[error("Rate limited by Notion (HTTP 429)")]
    RateLimited {
        /// `Retry-After` from the response, when present. Informational only.
        retry_after: Option<Duration>,
    },

    /// Any other non-2xx response.
    #[error("Notion API returned {status}: {body}")]
    Request { status: StatusCode, body: String },

    /// Connection failures, timeouts, and undecodable responses.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl NotionError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Response status, when the failure came with one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::RateLimited { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            Self::Request { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
        }
    }
}
