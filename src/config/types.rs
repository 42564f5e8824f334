use serde::Deserialize;

/// Listing front-end queried when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "http://gcsweb.k8s.io/";

/// Prefix the crawl starts from when none is configured
pub const DEFAULT_ROOT: &str = "/gcs/kubernetes-jenkins/logs/";

/// File name searched for when none is configured
pub const DEFAULT_FILE_NAME: &str = "serial-1.log";

/// Text searched for when none is configured
pub const DEFAULT_PATTERN: &str = "watchdog: BUG: soft lockup - CPU#";

/// Main configuration structure for listing-grep
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listing: ListingConfig,
    pub search: SearchRequest,
    pub http: HttpConfig,
}

/// Where the listing front-end lives
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Scheme and host (plus optional path prefix) that root-relative
    /// locations are appended to
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// The three inputs of a crawl, read-only for its whole duration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    /// Directory location the crawl starts from
    pub root: String,

    /// Links whose path ends with this are candidate files
    #[serde(rename = "file-name")]
    pub file_name: String,

    /// Literal text a candidate must contain to be reported
    pub pattern: String,
}

impl SearchRequest {
    pub fn new(
        root: impl Into<String>,
        file_name: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            file_name: file_name.into(),
            pattern: pattern.into(),
        }
    }
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT, DEFAULT_FILE_NAME, DEFAULT_PATTERN)
    }
}

/// HTTP client settings
///
/// Both fields are optional; when unset the client keeps reqwest's defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: Option<String>,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,
}
