//! Output module for reporting crawl results
//!
//! This module handles:
//! - The sink interface the crawler streams matches and fetch errors into
//! - Printing matches line by line to a terminal or any writer
//! - Collecting results in memory
//! - The per-run report and its printed form

mod collect;
mod console;
pub mod stats;
mod traits;

pub use collect::{CollectingSink, FailedFetch};
pub use console::ConsoleSink;
pub use stats::{print_report, CrawlReport};
pub use traits::{MatchResult, MatchSink, OutputError, OutputResult};
