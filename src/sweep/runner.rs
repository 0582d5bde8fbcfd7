//! Drives the sweep across every configured database.

use super::{OperationOutcome, RunSummary, apply_deletion, fetch_matching};
use crate::{
    config::{DatabaseConfig, RateLimitConfig},
    notion::{NotionApi, format_notion_id},
};

/// A database resolved for a run: normalized ID, display name and the
/// effective dry-run flag.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionTarget {
    pub database_id: String,
    pub name: String,
    pub filter: serde_json::Value,
    pub dry_run: bool,
}

impl CollectionTarget {
    /// Resolve a configured database. Its own `dry_run` wins over the global flag.
    pub fn from_config(config: &DatabaseConfig, global_dry_run: bool) -> Self {
        let database_id = format_notion_id(&config.database_id);
        let name = config
            .name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| database_id.clone());

        Self {
            database_id,
            name,
            filter: config.filters.clone(),
            dry_run: config.dry_run.unwrap_or(global_dry_run),
        }
    }
}

/// Sweep every database in order and tally the results.
///
/// Databases and pages are processed one at a time. A database whose query
/// fails counts as processed with zero matches and the run moves on.
pub async fn run_sweep(
    api: &dyn NotionApi,
    databases: &[DatabaseConfig],
    global_dry_run: bool,
    limits: &RateLimitConfig,
) -> RunSummary {
    let mut summary = RunSummary::default();

    tracing::info!(
        databases = databases.len(),
        dry_run = global_dry_run,
        "Starting Notion cleanup"
    );

    for config in databases {
        let target = CollectionTarget::from_config(config, global_dry_run);
        sweep_target(api, &target, limits, &mut summary).await;
    }

    summary
}

async fn sweep_target(
    api: &dyn NotionApi,
    target: &CollectionTarget,
    limits: &RateLimitConfig,
    summary: &mut RunSummary,
) {
    tracing::info!(
        name = %target.name,
        database_id = %target.database_id,
        dry_run = target.dry_run,
        "Processing database"
    );

    let page_ids = fetch_matching(api, &target.database_id, &target.filter, limits).await;
    summary.record_target(page_ids.len());

    if page_ids.is_empty() {
        tracing::info!(name = %target.name, "No records found matching criteria");
        return;
    }

    let total = page_ids.len();
    let mut failed = 0usize;
    for (index, page_id) in page_ids.iter().enumerate() {
        tracing::info!(
            name = %target.name,
            page_id = %page_id,
            "Processing record {}/{}",
            index + 1,
            total
        );

        let outcome = apply_deletion(api, page_id, target.dry_run, limits).await;
        if outcome == OperationOutcome::Failed {
            failed += 1;
        }
        summary.record(outcome);
    }

    tracing::info!(
        name = %target.name,
        matched = total,
        failed,
        "Finished database"
    );
}
