//! Error types for the advisor.
//!
//! None of these escape to the user as raw failures: catalog errors keep the
//! last view, gateway errors become the fallback assistant reply, and config
//! errors only occur before the window opens.

use std::path::PathBuf;
use thiserror::Error;

/// The catalog could not be fetched or parsed.
#[derive(Error, Debug)]
pub enum CatalogUnavailable {
    #[error("failed to read catalog at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch catalog from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("catalog endpoint {url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("malformed catalog payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The completion endpoint call failed or answered with an unexpected shape.
#[derive(Error, Debug)]
pub enum GatewayFailure {
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion endpoint answered with status {0}")]
    Status(u16),

    #[error("completion response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("completion response carried no choices")]
    EmptyChoices,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
