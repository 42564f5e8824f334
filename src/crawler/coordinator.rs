//! Crawler coordinator - main crawl orchestration logic
//!
//! This module walks the listing tree depth-first from the root location:
//! - Fetching each listing and splitting its links into candidate files and
//!   sub-directories
//! - Fetching every candidate file and matching its text against the pattern
//! - Remembering visited locations so a listing that links back to an
//!   ancestor is not crawled twice
//! - Reporting matches and fetch failures to a sink as they happen

use crate::config::SearchRequest;
use crate::crawler::fetcher::Fetch;
use crate::crawler::parser::{extract_links, FileLinkFilter, SubdirectoryFilter};
use crate::output::{CrawlReport, MatchResult, MatchSink};
use crate::url::visit_key;
use crate::{FetchError, GrepError};
use std::collections::HashSet;

/// Searches a listing tree for files containing a pattern
///
/// The crawler is a function of its [`SearchRequest`] and its [`Fetch`]
/// implementation; it holds no state between runs, so running it twice
/// against an unchanged listing service reports the same thing twice.
pub struct Crawler<F> {
    fetcher: F,
    request: SearchRequest,
}

/// Bookkeeping for one run
#[derive(Default)]
struct CrawlState {
    visited_directories: HashSet<String>,
    inspected_files: HashSet<String>,
    report: CrawlReport,
}

impl<F: Fetch> Crawler<F> {
    /// Creates a new crawler
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Where listings and file contents come from
    /// * `request` - Root location, target file name and pattern
    pub fn new(fetcher: F, request: SearchRequest) -> Self {
        Self { fetcher, request }
    }

    /// Runs the crawl to completion
    ///
    /// Listings are visited depth-first in document order. At every level
    /// all candidate files are checked before any sub-directory is entered.
    /// A listing that cannot be fetched loses only its own subtree, and a
    /// file that cannot be fetched is skipped; both are reported to the sink
    /// once and the crawl carries on.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - Crawl finished, with its counters
    /// * `Err(GrepError)` - The sink failed to record a result
    pub async fn run<S: MatchSink + ?Sized>(&self, sink: &mut S) -> Result<CrawlReport, GrepError> {
        let mut state = CrawlState::default();

        // Pending listings; the next one to visit is on top
        let mut stack = vec![self.request.root.clone()];

        while let Some(location) = stack.pop() {
            let subdirectories = self.process_directory(&location, &mut state, sink).await?;

            // Reversed so the first link in the document is visited first
            stack.extend(subdirectories.into_iter().rev());
        }

        tracing::debug!(
            "Visited {} directories, inspected {} files",
            state.report.directories_visited,
            state.report.files_inspected
        );

        Ok(state.report)
    }

    /// Handles one listing and returns the sub-directories to descend into
    async fn process_directory<S: MatchSink + ?Sized>(
        &self,
        location: &str,
        state: &mut CrawlState,
        sink: &mut S,
    ) -> Result<Vec<String>, GrepError> {
        let url = match self.fetcher.resolve(location) {
            Ok(url) => url,
            Err(e) => {
                if state.visited_directories.insert(location.to_string()) {
                    report_error(e, state, sink)?;
                } else {
                    state.report.revisits_skipped += 1;
                }
                return Ok(Vec::new());
            }
        };

        if !state.visited_directories.insert(visit_key(&url)) {
            tracing::debug!("Skipping already visited directory {}", location);
            state.report.revisits_skipped += 1;
            return Ok(Vec::new());
        }

        tracing::debug!("Listing {}", url);

        let document = match self.fetcher.fetch_document(location).await {
            Ok(document) => document,
            Err(e) => {
                report_error(e, state, sink)?;
                return Ok(Vec::new());
            }
        };
        state.report.directories_visited += 1;

        let files = extract_links(
            &document,
            &FileLinkFilter {
                file_name: &self.request.file_name,
            },
        );
        let mut subdirectories = extract_links(&document, &SubdirectoryFilter { location });
        drop(document);

        // A candidate file is never a listing, even though it usually
        // contains the current location too
        subdirectories.retain(|link| !files.contains(link));

        tracing::debug!(
            "{}: {} candidate files, {} sub-directories",
            location,
            files.len(),
            subdirectories.len()
        );

        for file in &files {
            self.process_file(file, state, sink).await?;
        }

        Ok(subdirectories)
    }

    /// Fetches one candidate file and reports it if it contains the pattern
    async fn process_file<S: MatchSink + ?Sized>(
        &self,
        location: &str,
        state: &mut CrawlState,
        sink: &mut S,
    ) -> Result<(), GrepError> {
        // Unresolvable links are keyed by their raw text
        let url = match self.fetcher.resolve(location) {
            Ok(url) => url,
            Err(e) if state.inspected_files.insert(location.to_string()) => {
                return report_error(e, state, sink)
            }
            Err(_) => {
                state.report.revisits_skipped += 1;
                return Ok(());
            }
        };

        if !state.inspected_files.insert(visit_key(&url)) {
            tracing::debug!("Skipping already inspected file {}", location);
            state.report.revisits_skipped += 1;
            return Ok(());
        }

        let text = match self.fetcher.fetch_text(location).await {
            Ok(text) => text,
            Err(e) => return report_error(e, state, sink),
        };
        state.report.files_inspected += 1;

        if text.contains(self.request.pattern.as_str()) {
            tracing::info!("Match: {}", url);
            state.report.matches += 1;
            sink.on_match(&MatchResult {
                location: location.to_string(),
                url,
            })?;
        }

        Ok(())
    }
}

/// Logs a fetch failure and hands it to the sink
fn report_error<S: MatchSink + ?Sized>(
    error: FetchError,
    state: &mut CrawlState,
    sink: &mut S,
) -> Result<(), GrepError> {
    tracing::warn!("{}", error);
    state.report.fetch_errors += 1;
    sink.on_fetch_error(&error)?;
    Ok(())
}
