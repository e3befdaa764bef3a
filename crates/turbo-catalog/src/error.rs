//! Catalog error types.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while listing the catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Transport failure talking to the catalog API.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// The API answered with GraphQL errors.
    #[error("Catalog API error: {0}")]
    Api(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The response did not contain the expected field.
    #[error("Missing data in response: {0}")]
    MissingData(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<turbo_data::FetchError> for CatalogError {
    fn from(e: turbo_data::FetchError) -> Self {
        match e {
            turbo_data::FetchError::JsonError(msg) => CatalogError::Serialization(msg),
            other => CatalogError::Fetch(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Serialization(e.to_string())
    }
}
