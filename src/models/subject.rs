//! Raw payloads returned by the Bangumi API.
//!
//! Fields the normalizer needs are kept optional here so that a payload with
//! a missing field still parses; the normalizer decides whether the absence
//! is fatal for the record.

use serde::{Deserialize, Serialize};

/// Subject type code for books.
pub const SUBJECT_TYPE_BOOK: u32 = 1;

/// Body of the legacy search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Total hits reported by the server
    #[serde(default)]
    pub results: Option<u64>,

    /// Hits on this page; `null` or missing when nothing matched
    #[serde(default)]
    pub list: Option<Vec<SearchHit>>,
}

impl SearchResponse {
    /// IDs of the hits, in server order.
    pub fn ids(&self) -> Vec<u64> {
        self.list
            .iter()
            .flatten()
            .map(|hit| hit.id)
            .collect()
    }
}

/// One search hit. Only the ID is used.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHit {
    pub id: u64,
}

/// One entry of the children-listing endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChildRef {
    pub id: u64,

    #[serde(rename = "type")]
    pub kind: u32,
}

impl ChildRef {
    /// Whether the child is itself a book subject.
    pub fn is_book(&self) -> bool {
        self.kind == SUBJECT_TYPE_BOOK
    }
}

/// Detail payload of a single subject.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SubjectDetail {
    pub id: u64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub name_cn: Option<String>,

    #[serde(default)]
    pub platform: Option<String>,

    #[serde(default)]
    pub series: bool,

    #[serde(default)]
    pub images: Option<Images>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub infobox: Option<Vec<InfoboxEntry>>,

    #[serde(default)]
    pub rating: Option<Rating>,

    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
}

/// Cover image URLs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Images {
    #[serde(default)]
    pub large: Option<String>,

    #[serde(default)]
    pub medium: Option<String>,

    #[serde(default)]
    pub small: Option<String>,
}

/// Aggregate user rating.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    /// Score on a 0-10 scale
    pub score: f64,

    #[serde(default)]
    pub total: Option<u64>,
}

/// A user-applied tag and how many users applied it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub count: u64,
}

/// One key/value pair of a subject's infobox.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InfoboxEntry {
    pub key: String,
    pub value: InfoboxValue,
}

/// Infobox values are either plain text or a list of sub-values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum InfoboxValue {
    Text(String),
    List(Vec<InfoboxItem>),
}

/// A sub-value of a multi-valued infobox entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InfoboxItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,
    pub v: String,
}
