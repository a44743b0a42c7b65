//! Layered configuration for native builds.
//!
//! Sources, lowest priority first: built-in defaults, an optional bundled
//! TOML string, an optional `bookshelf.toml` in the working directory, then
//! `BOOKSHELF_*` environment variables with `__` between section and key
//! (`BOOKSHELF_API__BASE_URL`, `BOOKSHELF_PAGING__PAGE_SIZE`).

use config::{Config, Environment, File, FileFormat, Map};
use shelf::ShelfConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
    #[error(transparent)]
    Invalid(#[from] shelf::ConfigError),
}

pub struct Settings;

impl Settings {
    /// Load from `bookshelf.toml` and the process environment.
    pub fn load() -> Result<ShelfConfig, SettingsError> {
        Self::build(None, ShelfConfig::filename(), None)
    }

    /// Like [`Settings::load`], with `bundled` TOML layered under the file.
    pub fn load_over(bundled: &str) -> Result<ShelfConfig, SettingsError> {
        Self::build(Some(bundled), ShelfConfig::filename(), None)
    }

    /// Load from `path`, taking environment variables from `env` instead of
    /// the process when given.
    pub fn load_from(
        path: &str,
        env: Option<Map<String, String>>,
    ) -> Result<ShelfConfig, SettingsError> {
        Self::build(None, path, env)
    }

    fn build(
        bundled: Option<&str>,
        path: &str,
        env: Option<Map<String, String>>,
    ) -> Result<ShelfConfig, SettingsError> {
        let defaults = ShelfConfig::default();
        let mut builder = Config::builder()
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.timeout_secs", defaults.api.timeout_secs)?
            .set_default("paging.page_size", defaults.paging.page_size)?
            .set_default("paging.scroll_threshold_px", defaults.paging.scroll_threshold_px)?
            .set_default("paging.debounce_ms", defaults.paging.debounce_ms)?;
        if let Some(bundled) = bundled {
            builder = builder.add_source(File::from_str(bundled, FileFormat::Toml));
        }
        let config = builder
            .add_source(File::with_name(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix("BOOKSHELF")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let settings: ShelfConfig = config.try_deserialize()?;
        settings.validate()?;
        tracing::debug!(base_url = %settings.api.base_url, "settings loaded");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load_from("does-not-exist.toml", env(&[])).unwrap();
        assert_eq!(settings, ShelfConfig::default());
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = std::env::temp_dir().join(format!("bookshelf_settings_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bookshelf.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://file\"\n\n[paging]\npage_size = 12\n",
        )
        .unwrap();

        let settings = Settings::load_from(
            path.to_str().unwrap(),
            env(&[
                ("BOOKSHELF_API__BASE_URL", "http://env"),
                ("BOOKSHELF_ASSETS__COS_REGION", "ap-shanghai"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.api.base_url, "http://env");
        assert_eq!(settings.paging.page_size, 12);
        assert_eq!(settings.assets.cos_region, "ap-shanghai");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_bundled_toml_sits_under_environment() {
        let bundled = "[paging]\npage_size = 12\n\n[assets]\ncos_bucket = \"covers\"\n";
        let settings = Settings::build(
            Some(bundled),
            "does-not-exist.toml",
            env(&[("BOOKSHELF_PAGING__PAGE_SIZE", "20")]),
        )
        .unwrap();
        assert_eq!(settings.paging.page_size, 20);
        assert_eq!(settings.assets.cos_bucket, "covers");
        assert_eq!(settings.api, ShelfConfig::default().api);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let err = Settings::load_from(
            "does-not-exist.toml",
            env(&[("BOOKSHELF_PAGING__PAGE_SIZE", "0")]),
        )
        .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }
}
