//! Crawler module for walking listings and matching files
//!
//! This module contains the core search logic, including:
//! - HTTP fetching of listing pages and file contents
//! - Link extraction from parsed listings
//! - The depth-first crawl that ties them together

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, Fetch, HttpFetcher};
pub use parser::{
    extract_links, FileLinkFilter, LinkFilter, ListingDocument, SubdirectoryFilter, HREF,
};

use crate::config::Config;
use crate::output::{CrawlReport, MatchSink};
use crate::GrepError;
use url::Url;

/// Runs a complete search over HTTP
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client from the configuration
/// 2. Crawl the listing tree from the configured root
/// 3. Stream matches and fetch errors into `sink`
///
/// # Arguments
///
/// * `config` - The validated configuration
/// * `sink` - Receives matches and fetch errors as they happen
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl finished; individual fetch failures are
///   counted in the report, not returned
/// * `Err(GrepError)` - The client could not be built or the sink failed
pub async fn crawl<S: MatchSink + ?Sized>(
    config: &Config,
    sink: &mut S,
) -> Result<CrawlReport, GrepError> {
    let base_url = Url::parse(&config.listing.base_url)?;
    let client = build_http_client(&config.http)?;

    let crawler = Crawler::new(HttpFetcher::new(client, base_url), config.search.clone());

    tracing::info!(
        "Searching {}{} for '{}' in files named {}",
        config.listing.base_url.trim_end_matches('/'),
        config.search.root,
        config.search.pattern,
        config.search.file_name
    );

    let start_time = std::time::Instant::now();
    let report = crawler.run(sink).await?;

    tracing::info!(
        "Crawl completed in {:?}: {} directories, {} files inspected, {} matches, {} fetch errors",
        start_time.elapsed(),
        report.directories_visited,
        report.files_inspected,
        report.matches,
        report.fetch_errors
    );

    Ok(report)
}
