//! listing-grep: find files in an object-store listing that contain a pattern
//!
//! This crate walks the HTML directory listings served in front of a blob
//! store, picks out every linked file with a given name, downloads it and
//! reports the ones whose text contains a literal pattern.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for listing-grep operations
///
/// Individual fetch failures never show up here; the crawler reports them to
/// its sink and keeps going. These are the failures that stop a run.
#[derive(Debug, Error)]
pub enum GrepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    BaseUrl(#[from] ::url::ParseError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// A failed GET against one location
///
/// Request construction, transport and status failures all land here;
/// the crawler handles every kind the same way.
#[derive(Debug, Error)]
#[error("error fetching {location}: {kind}")]
pub struct FetchError {
    /// The location as the crawler asked for it
    pub location: String,

    /// What went wrong
    #[source]
    pub kind: FetchErrorKind,
}

impl FetchError {
    pub fn new(location: impl Into<String>, kind: FetchErrorKind) -> Self {
        Self {
            location: location.into(),
            kind,
        }
    }
}

/// The cause behind a [`FetchError`]
#[derive(Debug, Error)]
pub enum FetchErrorKind {
    #[error("cannot build request: {0}")]
    RequestConstruction(String),

    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

/// Location-resolution errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for listing-grep operations
pub type Result<T> = std::result::Result<T, GrepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::{Config, SearchRequest};
pub use crawler::{crawl, Crawler};
pub use output::{CrawlReport, MatchResult, MatchSink};
