//! Listing configuration.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest page the upstream API accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Debounce window that feels responsive without a fetch per keystroke.
pub const RECOMMENDED_DEBOUNCE_MS: std::ops::RangeInclusive<u64> = 300..=1000;

/// Tunables for one catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// GraphQL endpoint. Required only when talking to a live API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Sales channel slug that scopes every query.
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Products per fetch.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Quiet period before a typed search is applied.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Upper bound on a single fetch.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Slots in the numbered pager, ellipses excluded.
    #[serde(default = "default_max_visible_pages")]
    pub max_visible_pages: usize,
}

fn default_channel() -> String {
    "default-channel".to_string()
}

fn default_page_size() -> u32 {
    12
}

fn default_search_debounce_ms() -> u64 {
    500
}

fn default_fetch_timeout_ms() -> u64 {
    5000
}

fn default_max_visible_pages() -> usize {
    7
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            channel: default_channel(),
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce_ms(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            max_visible_pages: default_max_visible_pages(),
        }
    }
}

impl ListingConfig {
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Check every field, reporting the first problem found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.channel.trim().is_empty() {
            return Err(CatalogError::Config("channel must not be empty".into()));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(CatalogError::Config(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }
        if self.search_debounce_ms == 0 {
            return Err(CatalogError::Config(
                "search_debounce_ms must be positive".into(),
            ));
        }
        if !RECOMMENDED_DEBOUNCE_MS.contains(&self.search_debounce_ms) {
            tracing::warn!(
                search_debounce_ms = self.search_debounce_ms,
                "search debounce outside the usual 300-1000 ms window"
            );
        }
        if self.fetch_timeout_ms == 0 {
            return Err(CatalogError::Config("fetch_timeout_ms must be positive".into()));
        }
        if self.max_visible_pages < 5 {
            return Err(CatalogError::Config(format!(
                "max_visible_pages must be at least 5, got {}",
                self.max_visible_pages
            )));
        }
        if let Some(url) = &self.api_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(CatalogError::Config(format!(
                    "api_url must be an http(s) URL: {url}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ListingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.channel, "default-channel");
        assert_eq!(config.page_size, 12);
        assert_eq!(config.search_debounce(), Duration::from_millis(500));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: ListingConfig = serde_json::from_str(r#"{"page_size": 24}"#).unwrap();
        assert_eq!(config.page_size, 24);
        assert_eq!(config.max_visible_pages, 7);
        assert_eq!(config.api_url, None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            ListingConfig { page_size: 0, ..Default::default() },
            ListingConfig { page_size: 101, ..Default::default() },
            ListingConfig { fetch_timeout_ms: 0, ..Default::default() },
            ListingConfig { search_debounce_ms: 0, ..Default::default() },
            ListingConfig { max_visible_pages: 4, ..Default::default() },
            ListingConfig::default().with_channel(" "),
            ListingConfig::default().with_api_url("shop.example.com/graphql/"),
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(CatalogError::Config(_))),
                "{config:?}"
            );
        }
    }

    #[test]
    fn test_unusual_debounce_is_still_valid() {
        let fast = ListingConfig { search_debounce_ms: 50, ..Default::default() };
        assert!(fast.validate().is_ok());
        let slow = ListingConfig { search_debounce_ms: 5_000, ..Default::default() };
        assert!(slow.validate().is_ok());
    }
}
