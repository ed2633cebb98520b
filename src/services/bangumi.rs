// src/services/bangumi.rs

//! Bangumi search orchestration.
//!
//! A search runs in four steps, each waiting for the previous one:
//!
//! 1. text search for candidate subject IDs
//! 2. fetch + normalize every hit
//! 3. list the book-type children of every hit
//! 4. fetch + normalize every child
//!
//! Only a failed text search ends the call early. Everything else degrades
//! to a missing record for the subject involved.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Config, MetaRecord};
use crate::services::MetadataProvider;
use crate::services::normalizer::{PROVIDER_ID, PROVIDER_NAME, RecordNormalizer};
use crate::services::subjects::SubjectFetcher;
use crate::utils::fanout::FanOut;

/// Records of one search plus what went wrong along the way.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    /// Records of the search hits, then records of their children
    pub records: Vec<MetaRecord>,
    /// Subject IDs returned by the text search
    pub hit_total: usize,
    /// Hits that produced no record
    pub primary_failures: usize,
    /// Child subject IDs discovered across all hits
    pub child_total: usize,
    /// Hits whose children could not be listed
    pub children_failures: usize,
    /// Children that produced no record
    pub secondary_failures: usize,
}

/// Metadata provider backed by the Bangumi API.
pub struct BangumiProvider {
    config: Arc<Config>,
    fetcher: SubjectFetcher,
    normalizer: RecordNormalizer,
    fan_out: FanOut,
}

impl BangumiProvider {
    /// Create a provider with the given configuration.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let fetcher = SubjectFetcher::new(&config)?;
        let normalizer = RecordNormalizer::new(&config);
        let fan_out = FanOut::new(config.http.max_concurrent);
        Ok(Self {
            config,
            fetcher,
            normalizer,
            fan_out,
        })
    }

    /// Replace the executor used for the fan-out passes.
    pub fn with_fan_out(mut self, fan_out: FanOut) -> Self {
        self.fan_out = fan_out;
        self
    }

    /// Search and report per-step counters along with the records.
    pub async fn search_with_outcome(&self, query: &str) -> SearchOutcome {
        let mut outcome = SearchOutcome::default();
        if !self.is_active() {
            log::debug!("Bangumi provider disabled, skipping search for {query:?}");
            return outcome;
        }

        let hits = match self.fetcher.search(query).await {
            Ok(hits) => hits,
            Err(e) => {
                log::warn!("Bangumi: search for {query:?} failed: {e}");
                return outcome;
            }
        };
        outcome.hit_total = hits.len();
        log::info!("Bangumi: {} hits for {query:?}", hits.len());

        let primary = self
            .fan_out
            .run(hits.clone(), |id| self.lookup(id))
            .await;
        outcome.primary_failures = primary.failures;

        let children = self
            .fan_out
            .run(hits, |id| self.fetcher.fetch_children(id))
            .await;
        outcome.children_failures = children.failures;
        let child_ids: Vec<u64> = children.values.into_iter().flatten().collect();
        outcome.child_total = child_ids.len();
        log::debug!("Bangumi: {} child subjects to expand", child_ids.len());

        let secondary = self.fan_out.run(child_ids, |id| self.lookup(id)).await;
        outcome.secondary_failures = secondary.failures;

        outcome.records = primary.values;
        outcome.records.extend(secondary.values);
        outcome
    }

    /// Fetch and normalize one subject.
    pub async fn try_lookup(&self, id: u64) -> Result<MetaRecord> {
        let detail = self.fetcher.try_fetch_detail(id).await?;
        self.normalizer.normalize(&detail)
    }

    /// Fetch and normalize one subject, logging any failure.
    pub async fn lookup(&self, id: u64) -> Option<MetaRecord> {
        let detail = self.fetcher.fetch_detail(id).await?;
        match self.normalizer.normalize(&detail) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Bangumi: dropping subject {id}: {e}");
                log::debug!("Bangumi: payload of subject {id}: {detail:?}");
                None
            }
        }
    }
}

#[async_trait]
impl MetadataProvider for BangumiProvider {
    fn id(&self) -> &str {
        PROVIDER_ID
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn is_active(&self) -> bool {
        self.config.provider.enabled
    }

    async fn search(&self, query: &str, _generic_cover: &str, _locale: &str) -> Vec<MetaRecord> {
        self.search_with_outcome(query).await.records
    }
}
