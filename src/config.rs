// src/config.rs

//! Configuration loading utilities.
//!
//! Settings come from an optional TOML file, then the process environment
//! overrides them, then the result is validated.

use std::path::Path;

use crate::error::Result;
use crate::models::Config;

/// Load configuration from a file (or defaults), overlay the environment,
/// and validate.
///
/// A missing or malformed file falls back to defaults with a warning.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_or_default(path),
        None => Config::default(),
    };
    config.apply_env();
    config.validate()?;
    Ok(config)
}

/// Render a configuration as TOML with secrets masked.
pub fn to_toml(config: &Config) -> Result<String> {
    Ok(toml::to_string_pretty(&config.redacted())?)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::models::Config;

    #[test]
    fn load_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bangumi.toml");
        fs::write(
            &path,
            r#"
            [provider]
            site_url = "https://bangumi.tv/"

            [http]
            timeout_secs = 5
            "#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.provider.site_url, "https://bangumi.tv/");
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.max_concurrent, 8);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_or_default(tmp.path().join("nope.toml"));
        assert_eq!(config.provider.api_base_url, "https://api.bgm.tv/");
    }

    #[test]
    fn malformed_file_is_an_error_for_strict_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "[http\ntimeout_secs = ").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn to_toml_masks_token() {
        let mut config = Config::default();
        config.provider.access_token = Some("secret".to_string());
        let rendered = to_toml(&config).unwrap();
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("********"));

        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.tags.max_count, 10);
    }
}
