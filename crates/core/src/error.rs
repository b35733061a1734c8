//! Error types for Mealfinder.

use thiserror::Error;

/// Everything that can go wrong between issuing a search and holding a
/// suggestion list. None of these reach the user; the widget logs them and
/// shows an empty list.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid search endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Search endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Malformed search response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Problems reading `.mealfinder.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
