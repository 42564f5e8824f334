//! Per-run crawl statistics
//!
//! The crawler fills in a [`CrawlReport`] as it goes and hands it back when
//! the traversal is done.

/// Counters for one crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Listing pages fetched and parsed
    pub directories_visited: u64,

    /// Candidate files whose text was fetched
    pub files_inspected: u64,

    /// Candidate files that contained the pattern
    pub matches: u64,

    /// Listings and files that could not be fetched
    pub fetch_errors: u64,

    /// Links skipped because their location was already seen
    pub revisits_skipped: u64,
}

/// Prints the report to stdout in a formatted manner
///
/// # Arguments
///
/// * `report` - The report to display
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Statistics ===\n");

    println!("  Directories visited: {}", report.directories_visited);
    println!("  Files inspected: {}", report.files_inspected);
    println!("  Matches: {}", report.matches);
    println!("  Fetch errors: {}", report.fetch_errors);
    println!("  Revisits skipped: {}", report.revisits_skipped);
}
