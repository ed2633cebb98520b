// src/pipeline/search.rs

//! Search pipeline used by the command line.

use std::sync::Arc;

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, MetaRecord};
use crate::services::{BangumiProvider, SearchOutcome};

/// Run one search and log a summary of how it went.
pub async fn run_search(config: Arc<Config>, query: &str) -> Result<SearchOutcome> {
    let start_time = Utc::now();
    log::info!("Searching Bangumi for {query:?}...");

    let provider = BangumiProvider::new(config)?;
    let outcome = provider.search_with_outcome(query).await;

    let elapsed = Utc::now() - start_time;
    log::info!(
        "Found {} records ({} hits, {} children) in {} ms",
        outcome.records.len(),
        outcome.hit_total,
        outcome.child_total,
        elapsed.num_milliseconds()
    );
    let failures =
        outcome.primary_failures + outcome.children_failures + outcome.secondary_failures;
    if failures > 0 {
        log::warn!(
            "{} lookups failed (hits: {}, child lists: {}, children: {})",
            failures,
            outcome.primary_failures,
            outcome.children_failures,
            outcome.secondary_failures
        );
    }

    Ok(outcome)
}

/// Fetch and normalize a single subject by ID.
pub async fn run_lookup(config: Arc<Config>, id: u64) -> Result<MetaRecord> {
    log::info!("Fetching Bangumi subject {id}...");
    let provider = BangumiProvider::new(config)?;
    provider.try_lookup(id).await
}
