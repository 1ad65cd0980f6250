// src/models/config.rs

//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and fetching behavior settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// CSS class names identifying product markup
    #[serde(default)]
    pub selectors: SelectorConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Listing page URLs to scrape, in processing order
    #[serde(default)]
    pub targets: Vec<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.selectors.fill_blanks();
        Ok(config)
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

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::config("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::config("fetch.timeout_secs must be > 0"));
        }
        if self.fetch.max_concurrent == 0 {
            return Err(AppError::config("fetch.max_concurrent must be > 0"));
        }
        if self.export.output_path.as_os_str().is_empty() {
            return Err(AppError::config("export.output_path is empty"));
        }
        Ok(())
    }
}

/// HTTP client and fetching behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum concurrent detail page requests
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Whole-run deadline in seconds (0 disables it)
    #[serde(default = "defaults::run_timeout")]
    pub run_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
            run_timeout_secs: defaults::run_timeout(),
        }
    }
}

/// CSS class names identifying product markup on listing and detail pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Class of gallery image tags on a detail page
    #[serde(default = "defaults::image_class")]
    pub image_class: String,

    /// Class of the description span on a detail page
    #[serde(default = "defaults::description_class")]
    pub description_class: String,

    /// Class of product item elements on a listing page
    #[serde(default = "defaults::item_class")]
    pub item_class: String,
}

impl SelectorConfig {
    /// Replace blank class names with their defaults, same as unset fields.
    pub fn fill_blanks(&mut self) {
        if self.image_class.trim().is_empty() {
            self.image_class = defaults::image_class();
        }
        if self.description_class.trim().is_empty() {
            self.description_class = defaults::description_class();
        }
        if self.item_class.trim().is_empty() {
            self.item_class = defaults::item_class();
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            image_class: defaults::image_class(),
            description_class: defaults::description_class(),
            item_class: defaults::item_class(),
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Path of the CSV file to write
    #[serde(default = "defaults::output_path")]
    pub output_path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: defaults::output_path(),
        }
    }
}

/// Split a comma-separated URL list into targets, dropping blank entries.
pub fn parse_url_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

mod defaults {
    use std::path::PathBuf;

    // Fetch defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; shopcrawl/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        0
    }
    pub fn max_concurrent() -> usize {
        1
    }
    pub fn run_timeout() -> u64 {
        0
    }

    // Selector defaults
    pub fn image_class() -> String {
        "lazyload".into()
    }
    pub fn description_class() -> String {
        "description-text".into()
    }
    pub fn item_class() -> String {
        "product-overview".into()
    }

    // Export defaults
    pub fn output_path() -> PathBuf {
        PathBuf::from("data.csv")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.fetch.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.fetch.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_fills_blank_selector_classes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "targets = [\"https://example.com/shoes\"]\n\n[selectors]\nimage_class = \"\"\nitem_class = \"grid-item\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.selectors.image_class, "lazyload");
        assert_eq!(config.selectors.item_class, "grid-item");
        assert_eq!(config.targets, vec!["https://example.com/shoes"]);
    }

    #[test]
    fn load_or_default_on_missing_file() {
        let config = Config::load_or_default("definitely/not/here.toml");
        assert_eq!(config.selectors.item_class, "product-overview");
        assert!(config.targets.is_empty());
    }

    #[test]
    fn parse_url_list_trims_and_drops_blanks() {
        assert_eq!(
            parse_url_list(" https://a.example/x , https://b.example/y ,, "),
            vec!["https://a.example/x", "https://b.example/y"]
        );
        assert!(parse_url_list("").is_empty());
        assert!(parse_url_list("  ").is_empty());
    }
}
