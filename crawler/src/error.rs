use std::path::PathBuf;

use thiserror::Error;

/// Why a page could not be fetched.
///
/// The crawl driver treats every variant the same way; the distinction
/// only shows up in logs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
