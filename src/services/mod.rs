//! Service layer for the metadata client.
//!
//! This module contains the business logic for:
//! - Infobox field extraction (`first_match`, `all_matches`)
//! - Record normalization (`RecordNormalizer`)
//! - Subject fetching (`SubjectFetcher`)
//! - Search orchestration (`BangumiProvider`)

mod bangumi;
pub mod infobox;
pub mod normalizer;
mod subjects;

use async_trait::async_trait;

use crate::models::MetaRecord;

pub use bangumi::{BangumiProvider, SearchOutcome};
pub use normalizer::RecordNormalizer;
pub use subjects::SubjectFetcher;

/// A source of book metadata.
///
/// Implementations never fail a search: problems are logged and the
/// affected records are left out.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Stable identifier of the source
    fn id(&self) -> &str;

    /// Display name of the source
    fn name(&self) -> &str;

    /// Whether the source should be queried at all
    fn is_active(&self) -> bool;

    /// Look up records matching a free-text title.
    ///
    /// `generic_cover` and `locale` exist for parity with other sources and
    /// may be ignored.
    async fn search(&self, query: &str, generic_cover: &str, locale: &str) -> Vec<MetaRecord>;
}
