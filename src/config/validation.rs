use crate::config::types::{Config, HttpConfig, ListingConfig, SearchRequest};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
///
/// The binary calls this again after applying command-line overrides.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_listing_config(&config.listing)?;
    validate_search_request(&config.search)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates the listing front-end settings
fn validate_listing_config(config: &ListingConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must use HTTP or HTTPS, got {}",
            config.base_url,
            url.scheme()
        )));
    }

    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' has no host",
            config.base_url
        )));
    }

    Ok(())
}

/// Validates the search inputs
fn validate_search_request(request: &SearchRequest) -> Result<(), ConfigError> {
    if request.root.is_empty() {
        return Err(ConfigError::Validation("root cannot be empty".to_string()));
    }

    // An empty suffix would turn every link on every page into a candidate
    if request.file_name.is_empty() {
        return Err(ConfigError::Validation(
            "file-name cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP client settings
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if let Some(0) = config.timeout_secs {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1, got 0".to_string(),
        ));
    }

    if let Some(agent) = &config.user_agent {
        if agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user-agent cannot be blank".to_string(),
            ));
        }
    }

    Ok(())
}
