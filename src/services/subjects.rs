// src/services/subjects.rs

//! Subject fetcher service.
//!
//! Talks to the three Bangumi endpoints used by a search: the legacy
//! text search, the subject detail and the related-subjects listing.

use reqwest::Client;
use url::Url;

use crate::error::Result;
use crate::models::{ChildRef, Config, SUBJECT_TYPE_BOOK, SearchResponse, SubjectDetail};
use crate::utils::http::{create_async_client, fetch_json, join_segments};

/// HTTP access to subjects.
#[derive(Debug, Clone)]
pub struct SubjectFetcher {
    client: Client,
    api_base: Url,
    max_results: usize,
}

impl SubjectFetcher {
    /// Create a fetcher with its own HTTP client.
    pub fn new(config: &Config) -> Result<Self> {
        let client = create_async_client(config)?;
        Self::with_client(config, client)
    }

    /// Create a fetcher sharing an existing HTTP client.
    pub fn with_client(config: &Config, client: Client) -> Result<Self> {
        let api_base = Url::parse(&config.provider.api_base_url)?;
        Ok(Self {
            client,
            api_base,
            max_results: config.provider.max_results,
        })
    }

    /// `/search/subject/<query>?type=1&responseGroup=small&max_results=N`
    pub fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = join_segments(&self.api_base, ["search", "subject", query])?;
        url.query_pairs_mut()
            .append_pair("type", &SUBJECT_TYPE_BOOK.to_string())
            .append_pair("responseGroup", "small")
            .append_pair("max_results", &self.max_results.to_string());
        Ok(url)
    }

    /// `/v0/subjects/<id>`
    pub fn detail_url(&self, id: u64) -> Result<Url> {
        join_segments(&self.api_base, ["v0", "subjects", id.to_string().as_str()])
    }

    /// `/v0/subjects/<id>/subjects`
    pub fn children_url(&self, id: u64) -> Result<Url> {
        join_segments(
            &self.api_base,
            ["v0", "subjects", id.to_string().as_str(), "subjects"],
        )
    }

    /// Run a text search and return the hit IDs, at most `max_results`.
    pub async fn search(&self, query: &str) -> Result<Vec<u64>> {
        let url = self.search_url(query)?;
        log::debug!("Searching {url}");
        let body: SearchResponse = fetch_json(&self.client, &url).await?;
        let mut ids = body.ids();
        ids.truncate(self.max_results);
        Ok(ids)
    }

    /// Fetch the detail payload of one subject.
    pub async fn try_fetch_detail(&self, id: u64) -> Result<SubjectDetail> {
        let url = self.detail_url(id)?;
        log::debug!("Fetching subject {id}");
        fetch_json(&self.client, &url).await
    }

    /// Fetch the IDs of book-type subjects related to one subject.
    pub async fn try_fetch_children(&self, id: u64) -> Result<Vec<u64>> {
        let url = self.children_url(id)?;
        log::debug!("Fetching children of subject {id}");
        let children: Vec<ChildRef> = fetch_json(&self.client, &url).await?;
        Ok(children
            .into_iter()
            .filter(ChildRef::is_book)
            .map(|child| child.id)
            .collect())
    }

    /// Like [`Self::try_fetch_detail`], logging and swallowing the failure.
    pub async fn fetch_detail(&self, id: u64) -> Option<SubjectDetail> {
        self.try_fetch_detail(id)
            .await
            .map_err(|e| log::warn!("Bangumi: failed to fetch subject {id}: {e}"))
            .ok()
    }

    /// Like [`Self::try_fetch_children`], logging and swallowing the failure.
    pub async fn fetch_children(&self, id: u64) -> Option<Vec<u64>> {
        self.try_fetch_children(id)
            .await
            .map_err(|e| log::warn!("Bangumi: failed to fetch children of subject {id}: {e}"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn fetcher() -> SubjectFetcher {
        SubjectFetcher::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_search_url() {
        let url = fetcher().search_url("test").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.bgm.tv/search/subject/test?type=1&responseGroup=small&max_results=10"
        );
    }

    #[test]
    fn test_search_url_escapes_query() {
        let url = fetcher().search_url("义妹 生活").unwrap();
        assert_eq!(
            url.path(),
            "/search/subject/%E4%B9%89%E5%A6%B9%20%E7%94%9F%E6%B4%BB"
        );
    }

    #[test]
    fn test_detail_and_children_urls() {
        let f = fetcher();
        assert_eq!(
            f.detail_url(42).unwrap().as_str(),
            "https://api.bgm.tv/v0/subjects/42"
        );
        assert_eq!(
            f.children_url(42).unwrap().as_str(),
            "https://api.bgm.tv/v0/subjects/42/subjects"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = Config::default();
        config.provider.api_base_url = "::nope".to_string();
        assert!(matches!(
            SubjectFetcher::new(&config),
            Err(AppError::Url(_))
        ));
    }
}
