//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client from configuration
//! - GET requests for listing pages, parsed into a [`ListingDocument`]
//! - GET requests for candidate files, returned as text
//! - Mapping every failure onto a single [`FetchError`]

use crate::config::HttpConfig;
use crate::crawler::parser::ListingDocument;
use crate::url::resolve_location;
use crate::{FetchError, FetchErrorKind, FetchResult};
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

/// Retrieves listings and file contents
///
/// This is the seam between the crawler and the network; tests substitute
/// an in-memory implementation.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    /// The URL root-relative locations are resolved against
    fn base_url(&self) -> &Url;

    /// Fetches and parses the listing page at `location`
    async fn fetch_document(&self, location: &str) -> FetchResult<ListingDocument>;

    /// Fetches the full body at `location` as text
    async fn fetch_text(&self, location: &str) -> FetchResult<String>;

    /// Resolves `location` to the absolute URL that would be fetched
    fn resolve(&self, location: &str) -> FetchResult<Url> {
        resolve_location(self.base_url(), location).map_err(|e| {
            FetchError::new(location, FetchErrorKind::RequestConstruction(e.to_string()))
        })
    }
}

/// Builds an HTTP client with the configured settings
///
/// Anything left unset keeps reqwest's defaults: no overall timeout, the
/// standard redirect policy, no extra headers.
///
/// # Example
///
/// ```no_run
/// use listing_grep::config::HttpConfig;
/// use listing_grep::crawler::build_http_client;
///
/// let config = HttpConfig {
///     user_agent: Some("listing-grep/0.1".to_string()),
///     timeout_secs: Some(30),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().gzip(true).brotli(true);

    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }

    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// [`Fetch`] over a reqwest [`Client`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Sends a GET for `location` and checks the status
    ///
    /// On a non-success status the body is read to the end before the error
    /// is returned, so the connection goes back to the pool.
    async fn get(&self, location: &str) -> FetchResult<Response> {
        let url = self.resolve(location)?;

        let request = self.client.get(url).build().map_err(|e| {
            FetchError::new(location, FetchErrorKind::RequestConstruction(e.to_string()))
        })?;

        tracing::trace!("GET {}", request.url());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| FetchError::new(location, FetchErrorKind::Network(e)))?;

        let status = response.status();
        if !status.is_success() {
            let _ = response.bytes().await;
            return Err(FetchError::new(
                location,
                FetchErrorKind::Status(status.as_u16()),
            ));
        }

        Ok(response)
    }
}

impl Fetch for HttpFetcher {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn fetch_document(&self, location: &str) -> FetchResult<ListingDocument> {
        let response = self.get(location).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::new(location, FetchErrorKind::Network(e)))?;

        Ok(ListingDocument::from_bytes(&body))
    }

    async fn fetch_text(&self, location: &str) -> FetchResult<String> {
        let response = self.get(location).await?;

        response
            .text()
            .await
            .map_err(|e| FetchError::new(location, FetchErrorKind::Network(e)))
    }
}
