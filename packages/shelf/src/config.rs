//! # Client configuration: `bookshelf.toml`
//!
//! ```toml
//! [api]
//! base_url = "https://library.example.org"   # empty = same origin
//! token = "..."                              # optional bearer token
//! timeout_secs = 30                          # native only
//!
//! [paging]
//! page_size = 8
//! scroll_threshold_px = 200
//! debounce_ms = 200
//!
//! [assets]
//! cos_bucket = "books-1250000000"
//! cos_region = "ap-shanghai"
//! ```
//!
//! Every section is optional; a missing or empty file is the default
//! configuration. Layered loading (file + environment) lives in the `api`
//! crate's `settings` module; this module only owns the document shape.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bookshelf.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("paging.page_size must be at least 1")]
    ZeroPageSize,
}

/// Top-level configuration stored in `bookshelf.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShelfConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
}

/// Backend connection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Prefix for every endpoint path. Empty means same origin.
    #[serde(default)]
    pub base_url: String,
    /// Bearer token sent in the `Authorization` header.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Infinite-scroll list settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PagingConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Load the next page once the content bottom is this close to the viewport bottom.
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold_px: u32,
    /// Quiet period after the last scroll event before the trigger is evaluated.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_page_size() -> u32 {
    8
}

fn default_scroll_threshold() -> u32 {
    200
}

fn default_debounce_ms() -> u64 {
    200
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            scroll_threshold_px: default_scroll_threshold(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl PagingConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Object-storage location of covers, avatars and e-books.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetsConfig {
    #[serde(default)]
    pub cos_bucket: String,
    #[serde(default)]
    pub cos_region: String,
}

impl ShelfConfig {
    /// Builder method to point the client at a backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// Builder method to set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api.token = Some(token.into());
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "bookshelf.toml"
    }

    /// Parse from TOML string and validate.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paging.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = ShelfConfig::from_toml("").unwrap();
        assert_eq!(config, ShelfConfig::default());
        assert_eq!(config.paging.page_size, 8);
        assert_eq!(config.paging.scroll_threshold_px, 200);
        assert_eq!(config.paging.debounce(), Duration::from_millis(200));
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_partial_sections() {
        let config = ShelfConfig::from_toml(
            r#"
            [api]
            base_url = "https://library.example.org"

            [paging]
            page_size = 12
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://library.example.org");
        assert!(config.api.token.is_none());
        assert_eq!(config.paging.page_size, 12);
        assert_eq!(config.paging.debounce_ms, 200);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = ShelfConfig::from_toml("[paging]\npage_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroPageSize));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ShelfConfig::default()
            .with_base_url("http://localhost:8080")
            .with_token("secret");
        let text = config.to_toml().unwrap();
        assert_eq!(ShelfConfig::from_toml(&text).unwrap(), config);
    }
}
