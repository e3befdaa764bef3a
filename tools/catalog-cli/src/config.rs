//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use turbo_catalog::ListingConfig;

use crate::logging::LogFormat;

/// File names searched for, in order, from the working directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["catalog.toml", ".catalog.toml", "catalog.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Listing configuration.
    #[serde(default)]
    pub listing: ListingConfig,

    /// Logging configuration.
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default)]
    pub format: LogFormat,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content, is_json(path))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Generate a default catalog.toml.
pub fn generate_default_config(api_url: Option<&str>) -> String {
    let api_url = match api_url {
        Some(url) => format!("api_url = \"{url}\""),
        None => "# api_url = \"https://shop.example.com/graphql/\"".to_string(),
    };
    format!(
        r#"# Catalog listing configuration

[listing]
{api_url}
channel = "default-channel"
page_size = 12
search_debounce_ms = 500
fetch_timeout_ms = 5000
max_visible_pages = 7

[log]
# pretty, compact or json
format = "pretty"
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config = CliConfig::parse(&generate_default_config(None), false).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_generated_config_with_url() {
        let content = generate_default_config(Some("https://shop.example.com/graphql/"));
        let config = CliConfig::parse(&content, false).unwrap();
        assert_eq!(
            config.listing.api_url.as_deref(),
            Some("https://shop.example.com/graphql/")
        );
        assert!(config.listing.validate().is_ok());
    }

    #[test]
    fn test_partial_json_config() {
        let config =
            CliConfig::parse(r#"{"listing": {"channel": "eu"}, "log": {"format": "json"}}"#, true)
                .unwrap();
        assert_eq!(config.listing.channel, "eu");
        assert_eq!(config.listing.page_size, 12);
        assert_eq!(config.log.format, LogFormat::Json);
    }
}
