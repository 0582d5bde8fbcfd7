//! Per-page outcomes and the run-wide tally.

use serde::Serialize;

/// Terminal result of processing one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationOutcome {
    Succeeded,
    Failed,
    SkippedDryRun,
}

/// Results from a single sweep run.
///
/// Created once per invocation and updated only by the sweep loop. Dry-run
/// pages are counted in `items_skipped` and never count as succeeded or failed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Number of databases queried.
    pub targets_processed: u64,
    /// Number of pages that matched a filter.
    pub items_matched: u64,
    /// Number of pages archived.
    pub items_succeeded: u64,
    /// Number of pages that could not be archived.
    pub items_failed: u64,
    /// Number of pages skipped because of dry-run mode.
    pub items_skipped: u64,
}

impl RunSummary {
    /// Record a queried database and how many pages matched.
    pub fn record_target(&mut self, matched: usize) {
        self.targets_processed += 1;
        self.items_matched += matched as u64;
    }

    pub fn record(&mut self, outcome: OperationOutcome) {
        match outcome {
            OperationOutcome::Succeeded => self.items_succeeded += 1,
            OperationOutcome::Failed => self.items_failed += 1,
            OperationOutcome::SkippedDryRun => self.items_skipped += 1,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.items_failed > 0
    }

    /// Process exit status: 0 only when nothing failed.
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() { 1 } else { 0 }
    }

    /// Emit the final report.
    pub fn log(&self, dry_run: bool) {
        tracing::info!(
            targets_processed = self.targets_processed,
            items_matched = self.items_matched,
            items_succeeded = self.items_succeeded,
            items_failed = self.items_failed,
            items_skipped = self.items_skipped,
            "Cleanup summary"
        );

        if let Some(note) = self.closing_note(dry_run) {
            tracing::info!("{note}");
        }

        if self.has_failures() {
            tracing::error!(
                items_failed = self.items_failed,
                "Some pages could not be archived"
            );
        }
    }

    /// Closing line for the report, chosen from what actually happened.
    ///
    /// A database can opt out of a global dry run, so the global flag alone
    /// does not say whether anything was archived.
    fn closing_note(&self, dry_run: bool) -> Option<&'static str> {
        match (self.items_succeeded > 0, self.items_skipped > 0) {
            (true, true) => Some(
                "Archived pages are in the Notion trash (recoverable for 30 days); \
                 dry-run databases were left untouched",
            ),
            (true, false) => {
                Some("Archived pages are in the Notion trash (recoverable for 30 days)")
            }
            (false, true) => Some("DRY RUN MODE: no pages were archived"),
            (false, false) if dry_run => Some("DRY RUN MODE: no pages were archived"),
            (false, false) => None,
        }
    }
}
