// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::Config;

/// Create a configured asynchronous HTTP client.
///
/// Every request carries `accept: application/json` and the configured
/// User-Agent. A bearer token is attached when one is configured.
pub fn create_async_client(config: &Config) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    if let Some(token) = config.provider.access_token.as_deref() {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| AppError::config(format!("Invalid access token: {e}")))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    let client = Client::builder()
        .user_agent(&config.http.user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.http.timeout_secs))
        .build()?;
    Ok(client)
}

/// GET a URL and decode its JSON body.
///
/// Non-2xx responses are reported as [`AppError::Status`].
pub async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &Url) -> Result<T> {
    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::status(url.as_str(), status.as_u16()));
    }
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

/// Append path segments to a base URL, escaping each one.
pub fn join_segments<I, S>(base: &Url, segments: I) -> Result<Url>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| AppError::config(format!("{base} cannot be used as a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
