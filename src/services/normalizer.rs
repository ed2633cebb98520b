// src/services/normalizer.rs

//! Record normalizer service.
//!
//! Maps one raw subject payload into the fixed [`MetaRecord`] shape.

use std::collections::BTreeMap;

use crate::error::{AppError, Result};
use crate::models::{Config, InfoboxEntry, MetaRecord, MetaSourceInfo, SubjectDetail, TagConfig};
use crate::services::infobox::{all_matches, first_match};
use crate::utils::clean_string;
use crate::utils::date::normalize_date;

/// Provider identifier used in records and identifiers.
pub const PROVIDER_ID: &str = "bangumi";

/// Human-readable provider name.
pub const PROVIDER_NAME: &str = "Bangumi";

/// Infobox labels, highest priority first.
pub mod labels {
    /// Author, then artist and illustrator credits
    pub const AUTHORS: [&str; 4] = ["作者", "作画", "插图", "插画"];
    pub const ISBN: [&str; 1] = ["ISBN"];
    /// Imprint label wins over the publisher label
    pub const PUBLISHER: [&str; 2] = ["文库", "出版社"];
    /// Release date, then serialization start
    pub const PUBLISHED_DATE: [&str; 2] = ["发售日", "开始"];
}

/// Suffix appended to the platform label of series subjects.
pub const SERIES_SUFFIX: &str = "系列";

/// Converts subject payloads into records.
#[derive(Debug, Clone)]
pub struct RecordNormalizer {
    site_url: String,
    tags: TagConfig,
}

impl RecordNormalizer {
    pub fn new(config: &Config) -> Self {
        Self {
            site_url: config.provider.site_url.clone(),
            tags: config.tags.clone(),
        }
    }

    /// Build a record from a subject payload.
    ///
    /// Fails when a required field (names, platform, cover, summary,
    /// infobox, rating, tags) is missing. An unparseable release date is
    /// not a failure; the date is simply left out.
    pub fn normalize(&self, detail: &SubjectDetail) -> Result<MetaRecord> {
        let id = detail.id;
        let infobox = required(id, "infobox", detail.infobox.as_deref())?;

        Ok(MetaRecord {
            id,
            title: parse_title(detail)?,
            authors: all_matches(infobox, &labels::AUTHORS),
            url: format!("{}/subject/{}", self.site_url.trim_end_matches('/'), id),
            source: MetaSourceInfo {
                id: PROVIDER_ID.to_string(),
                description: format!("{} {}", PROVIDER_NAME, parse_platform(detail)?),
                link: self.site_url.clone(),
            },
            cover: parse_cover(detail)?,
            description: clean_string(required(id, "summary", detail.summary.as_deref())?),
            series: None,
            series_index: None,
            identifiers: parse_identifiers(id, infobox),
            publisher: first_match(infobox, &labels::PUBLISHER),
            published_date: parse_published_date(infobox),
            rating: parse_rating(detail)?,
            languages: Vec::new(),
            tags: self.parse_tags(detail)?,
        })
    }

    /// Popular tags in source order, capped at the configured count.
    fn parse_tags(&self, detail: &SubjectDetail) -> Result<Vec<String>> {
        let tags = required(detail.id, "tags", detail.tags.as_deref())?;
        Ok(tags
            .iter()
            .filter(|tag| tag.count >= self.tags.min_user_count)
            .map(|tag| clean_string(&tag.name))
            .take(self.tags.max_count)
            .collect())
    }
}

fn required<'a, T: ?Sized>(id: u64, field: &str, value: Option<&'a T>) -> Result<&'a T> {
    value.ok_or_else(|| AppError::normalize(id, format!("missing field `{field}`")))
}

fn parse_title(detail: &SubjectDetail) -> Result<String> {
    match detail.name_cn.as_deref() {
        Some(name_cn) if !name_cn.is_empty() => Ok(name_cn.to_string()),
        _ => Ok(required(detail.id, "name", detail.name.as_deref())?.to_string()),
    }
}

fn parse_platform(detail: &SubjectDetail) -> Result<String> {
    let platform = required(detail.id, "platform", detail.platform.as_deref())?;
    if detail.series {
        Ok(format!("{platform}{SERIES_SUFFIX}"))
    } else {
        Ok(platform.to_string())
    }
}

fn parse_cover(detail: &SubjectDetail) -> Result<String> {
    let large = detail
        .images
        .as_ref()
        .and_then(|images| images.large.as_deref());
    Ok(clean_string(required(detail.id, "images.large", large)?))
}

fn parse_identifiers(id: u64, infobox: &[InfoboxEntry]) -> BTreeMap<String, String> {
    let mut identifiers = BTreeMap::from([(PROVIDER_ID.to_string(), id.to_string())]);
    if let Some(isbn) = first_match(infobox, &labels::ISBN) {
        identifiers.insert("isbn".to_string(), isbn);
    }
    identifiers
}

fn parse_published_date(infobox: &[InfoboxEntry]) -> Option<String> {
    let raw = first_match(infobox, &labels::PUBLISHED_DATE)?;
    normalize_date(&raw)
}

/// Rescale a 0-10 score to 0-5 stars, rounding half to even.
fn parse_rating(detail: &SubjectDetail) -> Result<u8> {
    let rating = required(detail.id, "rating", detail.rating.as_ref())?;
    let stars = (rating.score / 2.0).round_ties_even();
    if !stars.is_finite() {
        return Err(AppError::normalize(
            detail.id,
            format!("rating score {} is not a number", rating.score),
        ));
    }
    Ok(stars.clamp(0.0, 5.0) as u8)
}
