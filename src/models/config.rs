//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Environment variable holding the Bangumi bearer token.
pub const ENV_ACCESS_TOKEN: &str = "BGM_ACCESS_TOKEN";
/// Environment variable overriding the fan-out concurrency.
pub const ENV_THREAD_POOL: &str = "META_PROVIDER_BGM_THREAD_POOL";
/// Environment variable overriding the minimum tag popularity.
pub const ENV_TAG_LOWEST_USER_CNT: &str = "META_PROVIDER_BGM_TAG_LOWEST_USER_CNT";
/// Environment variable overriding the maximum tag count.
pub const ENV_TAG_MAX_CNT: &str = "META_PROVIDER_BGM_TAG_MAX_CNT";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote catalog settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// HTTP client and concurrency settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Tag filtering rules
    #[serde(default)]
    pub tags: TagConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Overlay settings from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Overlay settings from an arbitrary variable lookup.
    ///
    /// Integer variables that fail to parse are logged and ignored. An empty
    /// token is treated as no token.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(ENV_ACCESS_TOKEN) {
            let token = token.trim();
            self.provider.access_token = (!token.is_empty()).then(|| token.to_string());
        }
        if let Some(value) = env_number(&lookup, ENV_THREAD_POOL) {
            self.http.max_concurrent = value;
        }
        if let Some(value) = env_number(&lookup, ENV_TAG_LOWEST_USER_CNT) {
            self.tags.min_user_count = value as u64;
        }
        if let Some(value) = env_number(&lookup, ENV_TAG_MAX_CNT) {
            self.tags.max_count = value;
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.http.max_concurrent == 0 {
            return Err(AppError::validation("http.max_concurrent must be > 0"));
        }
        if self.provider.max_results == 0 {
            return Err(AppError::validation("provider.max_results must be > 0"));
        }
        for (field, value) in [
            ("provider.api_base_url", &self.provider.api_base_url),
            ("provider.site_url", &self.provider.site_url),
        ] {
            let url = Url::parse(value)
                .map_err(|e| AppError::validation(format!("{field} is not a URL: {e}")))?;
            if url.cannot_be_a_base() {
                return Err(AppError::validation(format!(
                    "{field} cannot be used as a base URL"
                )));
            }
        }
        Ok(())
    }

    /// Copy of this configuration that is safe to print.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.provider.access_token.is_some() {
            config.provider.access_token = Some("********".to_string());
        }
        config
    }
}

fn env_number<F>(lookup: &F, key: &str) -> Option<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<usize>() {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring {key}={raw:?}: {e}");
            None
        }
    }
}

/// Remote catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Set to false to skip all network activity
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,

    /// Base URL of the JSON API
    #[serde(default = "defaults::api_base_url")]
    pub api_base_url: String,

    /// Base URL of the public website, used for record links
    #[serde(default = "defaults::site_url")]
    pub site_url: String,

    /// Optional bearer token for authenticated requests
    #[serde(default)]
    pub access_token: Option<String>,

    /// Maximum number of search hits to expand
    #[serde(default = "defaults::max_results")]
    pub max_results: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled(),
            api_base_url: defaults::api_base_url(),
            site_url: defaults::site_url(),
            access_token: None,
            max_results: defaults::max_results(),
        }
    }
}

/// HTTP client and concurrency settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent requests per fan-out pass
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Tag filtering rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagConfig {
    /// Tags applied by fewer users than this are dropped
    #[serde(default = "defaults::min_user_count")]
    pub min_user_count: u64,

    /// Maximum number of tags kept per record
    #[serde(default = "defaults::max_count")]
    pub max_count: usize,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            min_user_count: defaults::min_user_count(),
            max_count: defaults::max_count(),
        }
    }
}

mod defaults {
    // Provider defaults
    pub fn enabled() -> bool {
        true
    }
    pub fn api_base_url() -> String {
        "https://api.bgm.tv/".into()
    }
    pub fn site_url() -> String {
        "https://bgm.tv/".into()
    }
    pub fn max_results() -> usize {
        10
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        8
    }

    // Tag defaults
    pub fn min_user_count() -> u64 {
        5
    }
    pub fn max_count() -> usize {
        10
    }
}
