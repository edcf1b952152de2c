// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file support for ember-search
//!
//! Loads configuration from .embersearchrc.toml in current directory or ~/.config/ember-search/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::engine::{OutputFormat, SearchOptions};
use crate::errors::{Result, SearchError};
use crate::npm::DEFAULT_NPM_REGISTRY_URL;
use crate::registry::DEFAULT_REGISTRY_URL;

pub const DEFAULT_ADDON_PAGE_SIZE: usize = 10;
pub const DEFAULT_CODE_PAGE_SIZE: usize = 5;

/// Configuration loaded from .embersearchrc.toml or ~/.config/ember-search/config.toml
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the addon registry
    pub registry_url: Option<String>,
    /// Base URL of the npms.io API
    pub npm_registry_url: Option<String>,
    /// Addons shown per page in a name search
    pub addon_page_size: Option<usize>,
    /// Matches shown per page in a scoped code search
    pub code_page_size: Option<usize>,
    /// Give up on a request after this many seconds; unset waits forever
    pub timeout_secs: Option<u64>,
    /// Force color on or off
    pub color: Option<bool>,
    /// Default output format (text or json)
    pub default_format: Option<String>,
}

/// Values given on the command line; each one wins over the config file
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub registry_url: Option<String>,
    pub page_size: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub no_color: bool,
    pub format: Option<OutputFormat>,
}

impl Config {
    /// Load configuration from files
    ///
    /// Precedence (highest to lowest):
    /// 1. .embersearchrc.toml in current directory
    /// 2. ~/.config/ember-search/config.toml
    pub fn load() -> Self {
        if let Some(config) = Self::load_from_path(&PathBuf::from(".embersearchrc.toml")) {
            return config;
        }

        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".config").join("ember-search").join("config.toml");
            if let Some(config) = Self::load_from_path(&config_path) {
                return config;
            }
        }

        Self::default()
    }

    pub fn load_from_path(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Get output format from config, parsing the string to OutputFormat
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.default_format.as_ref().and_then(|s| match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "text" => Some(OutputFormat::Text),
            _ => None,
        })
    }

    pub fn registry_url(&self, cli: &CliOverrides) -> String {
        cli.registry_url
            .clone()
            .or_else(|| self.registry_url.clone())
            .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string())
    }

    pub fn npm_registry_url(&self) -> String {
        self.npm_registry_url
            .clone()
            .unwrap_or_else(|| DEFAULT_NPM_REGISTRY_URL.to_string())
    }

    pub fn timeout(&self, cli: &CliOverrides) -> Option<Duration> {
        cli.timeout_secs.or(self.timeout_secs).map(Duration::from_secs)
    }

    /// Color is on unless disabled by flag, config, or `NO_COLOR`.
    pub fn use_color(&self, cli: &CliOverrides) -> bool {
        if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
            return false;
        }
        self.color.unwrap_or(true)
    }

    /// Merge CLI options with config (CLI wins). A `--page-size` applies to
    /// both kinds of paged output.
    pub fn search_options(&self, cli: &CliOverrides) -> Result<SearchOptions> {
        let addon_page_size = cli
            .page_size
            .or(self.addon_page_size)
            .unwrap_or(DEFAULT_ADDON_PAGE_SIZE);
        let code_page_size = cli
            .page_size
            .or(self.code_page_size)
            .unwrap_or(DEFAULT_CODE_PAGE_SIZE);
        if addon_page_size == 0 || code_page_size == 0 {
            return Err(SearchError::InvalidConfig(
                "page size must be at least 1".to_string(),
            ));
        }

        Ok(SearchOptions {
            addon_page_size,
            code_page_size,
            format: cli.format.or_else(|| self.output_format()).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_without_file() {
        let config = Config::default();
        let cli = CliOverrides::default();
        let options = config.search_options(&cli).expect("options");

        assert_eq!(options.addon_page_size, 10);
        assert_eq!(options.code_page_size, 5);
        assert_eq!(options.format, OutputFormat::Text);
        assert_eq!(config.registry_url(&cli), "https://emberobserver.com");
        assert_eq!(config.timeout(&cli), None);
    }

    #[test]
    fn file_values_are_read() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "registry_url = \"http://localhost:4000\"\naddon_page_size = 20\ntimeout_secs = 15\ndefault_format = \"json\"\n",
        )
        .expect("write config");

        let config = Config::load_from_path(&path).expect("config");
        let cli = CliOverrides::default();
        let options = config.search_options(&cli).expect("options");

        assert_eq!(config.registry_url(&cli), "http://localhost:4000");
        assert_eq!(options.addon_page_size, 20);
        assert_eq!(options.code_page_size, 5);
        assert_eq!(options.format, OutputFormat::Json);
        assert_eq!(config.timeout(&cli), Some(Duration::from_secs(15)));
    }

    #[test]
    fn cli_wins_over_file() {
        let config = Config {
            registry_url: Some("http://from-file".into()),
            addon_page_size: Some(20),
            ..Config::default()
        };
        let cli = CliOverrides {
            registry_url: Some("http://from-cli".into()),
            page_size: Some(3),
            ..CliOverrides::default()
        };
        let options = config.search_options(&cli).expect("options");

        assert_eq!(config.registry_url(&cli), "http://from-cli");
        assert_eq!(options.addon_page_size, 3);
        assert_eq!(options.code_page_size, 3);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let config = Config::default();
        let cli = CliOverrides {
            page_size: Some(0),
            ..CliOverrides::default()
        };
        assert!(matches!(
            config.search_options(&cli),
            Err(SearchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn malformed_file_is_ignored() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "addon_page_size = \"many\"").expect("write config");
        assert!(Config::load_from_path(&path).is_none());
    }
}
