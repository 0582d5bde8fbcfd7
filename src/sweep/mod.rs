//! The sweep engine.
//!
//! For each configured database the engine collects every page matching the
//! filter ([`fetch_matching`]), then archives the pages one at a time
//! ([`apply_deletion`]), tallying outcomes into a [`RunSummary`]. Everything
//! runs sequentially on a single task; pacing between requests keeps the job
//! under Notion's per-integration rate limit.

mod mutator;
mod paginator;
mod runner;
mod summary;
#[cfg(test)]
pub(crate) mod test_utils;

pub use mutator::apply_deletion;
pub use paginator::{collect_matching, fetch_matching};
pub use runner::{CollectionTarget, run_sweep};
pub use summary::{OperationOutcome, RunSummary};
