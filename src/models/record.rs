//! Normalized book metadata record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Where a record came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetaSourceInfo {
    /// Constant provider identifier
    pub id: String,

    /// Provider name followed by the subject's platform label
    pub description: String,

    /// Provider homepage
    pub link: String,
}

/// Book metadata in the fixed shape consumed by the hosting application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetaRecord {
    /// Subject ID the record was built from
    pub id: u64,

    pub title: String,

    /// Authors and illustrators, in label priority order
    pub authors: Vec<String>,

    /// Subject page on the website
    pub url: String,

    pub source: MetaSourceInfo,

    pub cover: String,

    pub description: String,

    pub series: Option<String>,

    pub series_index: Option<u32>,

    /// Provider ID plus ISBN when known
    pub identifiers: BTreeMap<String, String>,

    pub publisher: Option<String>,

    /// Canonical `YYYY-MM-DD`
    #[serde(rename = "publishedDate")]
    pub published_date: Option<String>,

    /// 0-5 stars
    pub rating: u8,

    pub languages: Vec<String>,

    pub tags: Vec<String>,
}

impl MetaRecord {
    /// Short one-line rendering for terminal output.
    pub fn summary_line(&self) -> String {
        let authors = if self.authors.is_empty() {
            "-".to_string()
        } else {
            self.authors.join(", ")
        };
        format!(
            "[{}] {} / {} ({}) {}★",
            self.id,
            self.title,
            authors,
            self.published_date.as_deref().unwrap_or("????-??-??"),
            self.rating
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> MetaRecord {
        MetaRecord {
            id: 1,
            title: "义妹生活".to_string(),
            authors: vec!["三河ごーすと".to_string(), "Hiten".to_string()],
            url: "https://bgm.tv/subject/1".to_string(),
            source: MetaSourceInfo {
                id: "bangumi".to_string(),
                description: "Bangumi 小说".to_string(),
                link: "https://bgm.tv/".to_string(),
            },
            cover: String::new(),
            description: String::new(),
            series: None,
            series_index: None,
            identifiers: BTreeMap::from([("bangumi".to_string(), "1".to_string())]),
            publisher: None,
            published_date: Some("2021-01-25".to_string()),
            rating: 4,
            languages: Vec::new(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn serializes_published_date_in_camel_case() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["publishedDate"], "2021-01-25");
        assert!(json.get("published_date").is_none());
        assert!(json["series_index"].is_null());
        assert_eq!(json["identifiers"]["bangumi"], "1");
    }

    #[test]
    fn summary_line_format() {
        let line = sample_record().summary_line();
        assert_eq!(line, "[1] 义妹生活 / 三河ごーすと, Hiten (2021-01-25) 4★");
    }
}
