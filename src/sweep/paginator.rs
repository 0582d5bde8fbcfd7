//! Walks a filtered database query to completion.

use std::collections::HashSet;

use crate::{
    config::RateLimitConfig,
    notion::{NotionApi, NotionError},
};

/// Collect the IDs of every page matching `filter`.
///
/// A failed query yields an empty list, never the pages gathered before the
/// failure, so a broken run cannot archive an arbitrary partial subset.
pub async fn fetch_matching(
    api: &dyn NotionApi,
    database_id: &str,
    filter: &serde_json::Value,
    limits: &RateLimitConfig,
) -> Vec<String> {
    tracing::info!(
        database_id = %database_id,
        filter = %filter,
        "Querying database"
    );

    match collect_matching(api, database_id, filter, limits).await {
        Ok(ids) => {
            tracing::info!(
                database_id = %database_id,
                count = ids.len(),
                "Found records matching criteria"
            );
            ids
        }
        Err(e) if e.is_rate_limited() => {
            tracing::error!(
                database_id = %database_id,
                error = %e,
                "Rate limited while querying database, treating as no matches"
            );
            Vec::new()
        }
        Err(e) => {
            tracing::error!(
                database_id = %database_id,
                status = e.status().map(|status| status.as_u16()),
                error = %e,
                "Error querying database, treating as no matches"
            );
            Vec::new()
        }
    }
}

/// Page through the query, pausing between follow-up requests.
///
/// Stops at the first page without a continuation cursor. IDs repeated across
/// pages are kept once, in first-seen order.
pub async fn collect_matching(
    api: &dyn NotionApi,
    database_id: &str,
    filter: &serde_json::Value,
    limits: &RateLimitConfig,
) -> Result<Vec<String>, NotionError> {
    let mut ids = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0u32;

    loop {
        let page = api
            .query_database(database_id, filter, cursor.as_deref())
            .await?;
        pages += 1;

        let next = page.continuation().map(str::to_owned);

        for id in page.ids {
            if seen.insert(id.clone()) {
                ids.push(id);
            } else {
                tracing::debug!(page_id = %id, "Skipping page repeated across result pages");
            }
        }

        let Some(next) = next else {
            break;
        };

        tracing::debug!(
            database_id = %database_id,
            pages,
            collected = ids.len(),
            "More results available, fetching next page"
        );
        tokio::time::sleep(limits.request_interval()).await;
        cursor = Some(next);
    }

    Ok(ids)
}
