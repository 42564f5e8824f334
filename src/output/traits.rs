//! Output sink traits and types
//!
//! This module defines the trait the crawler reports through and the
//! match record it hands over.

use crate::FetchError;
use thiserror::Error;
use url::Url;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A candidate file whose text contained the pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// The link target as it appeared in the listing
    pub location: String,

    /// The absolute URL the text was fetched from
    pub url: Url,
}

/// Trait for match sinks
///
/// The crawler calls into the sink as it goes, in traversal order. A sink
/// error stops the crawl; fetch errors handed to the sink do not.
pub trait MatchSink {
    /// Records a file that matched both the name and the pattern
    ///
    /// # Arguments
    ///
    /// * `result` - The matching file
    fn on_match(&mut self, result: &MatchResult) -> OutputResult<()>;

    /// Records a listing or file that could not be fetched
    ///
    /// Called exactly once per failed location.
    ///
    /// # Arguments
    ///
    /// * `error` - The failure, carrying the location
    fn on_fetch_error(&mut self, error: &FetchError) -> OutputResult<()>;
}

impl<S: MatchSink + ?Sized> MatchSink for &mut S {
    fn on_match(&mut self, result: &MatchResult) -> OutputResult<()> {
        (**self).on_match(result)
    }

    fn on_fetch_error(&mut self, error: &FetchError) -> OutputResult<()> {
        (**self).on_fetch_error(error)
    }
}
