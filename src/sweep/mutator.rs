//! Archives a single page with bounded rate-limit retries.
//!
//! Per page:
//!
//! ```text
//! Pending ─┬─ dry run ──────────────────────────────► SkippedDryRun
//!          └─ Attempting ─┬─ 2xx ─ pause ───────────► Succeeded
//!               ▲         ├─ 429 ─► Backoff ─┬──────► Failed (attempts exhausted)
//!               └─────────┼──────────────────┘
//!                         └─ other error ───────────► Failed
//! ```

use std::time::Duration;

use super::OperationOutcome;
use crate::{
    config::RateLimitConfig,
    notion::{NotionApi, NotionError},
};

/// Where one page's deletion currently stands. `attempt` is 0-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DeletionState {
    Attempting {
        attempt: u32,
    },
    Backoff {
        attempt: u32,
        retry_after: Option<Duration>,
    },
    Done(OperationOutcome),
}

/// Archive `page_id`, or only log it when `dry_run` is set.
///
/// Only `429` responses are retried, waiting
/// [`RateLimitConfig::delay_for_attempt`] after each one. Any other error
/// fails the page immediately. A successful archive is followed by the fixed
/// request interval so that back-to-back calls stay under Notion's rate limit.
pub async fn apply_deletion(
    api: &dyn NotionApi,
    page_id: &str,
    dry_run: bool,
    limits: &RateLimitConfig,
) -> OperationOutcome {
    if dry_run {
        tracing::info!(page_id = %page_id, "DRY RUN: Would archive page");
        return OperationOutcome::SkippedDryRun;
    }

    let max_attempts = limits.max_attempts.max(1);
    let mut state = DeletionState::Attempting { attempt: 0 };

    loop {
        state = match state {
            DeletionState::Attempting { attempt } => {
                attempt_archive(api, page_id, attempt, limits).await
            }
            DeletionState::Backoff {
                attempt,
                retry_after,
            } => {
                let delay = limits.delay_for_attempt(attempt);
                tracing::warn!(
                    page_id = %page_id,
                    attempt = attempt + 1,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    retry_after_secs = retry_after.map(|d| d.as_secs()),
                    "Rate limited, backing off"
                );
                tokio::time::sleep(delay).await;

                if attempt + 1 < max_attempts {
                    DeletionState::Attempting {
                        attempt: attempt + 1,
                    }
                } else {
                    tracing::error!(
                        page_id = %page_id,
                        attempts = max_attempts,
                        "Failed to archive page after all attempts"
                    );
                    DeletionState::Done(OperationOutcome::Failed)
                }
            }
            DeletionState::Done(outcome) => return outcome,
        };
    }
}

/// Issue one archive request and decide the next state.
async fn attempt_archive(
    api: &dyn NotionApi,
    page_id: &str,
    attempt: u32,
    limits: &RateLimitConfig,
) -> DeletionState {
    match api.archive_page(page_id).await {
        Ok(()) => {
            tracing::info!(page_id = %page_id, attempt = attempt + 1, "Archived page");
            tokio::time::sleep(limits.request_interval()).await;
            DeletionState::Done(OperationOutcome::Succeeded)
        }
        Err(NotionError::RateLimited { retry_after }) => DeletionState::Backoff {
            attempt,
            retry_after,
        },
        Err(e) => {
            tracing::error!(
                page_id = %page_id,
                attempt = attempt + 1,
                status = e.status().map(|status| status.as_u16()),
                error = %e,
                "Error archiving page"
            );
            DeletionState::Done(OperationOutcome::Failed)
        }
    }
}
