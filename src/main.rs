//! listing-grep main entry point
//!
//! This is the command-line interface for searching object-store listings.

use anyhow::Context;
use clap::Parser;
use listing_grep::config::{load_config, validate, Config};
use listing_grep::crawl;
use listing_grep::output::{print_report, ConsoleSink};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// listing-grep: search an object-store listing for files containing a pattern
///
/// Walks the HTML directory listings under a root path, fetches every linked
/// file with the given name and prints the ones whose text contains the
/// pattern, one per line. The pattern is plain text, not a regex.
#[derive(Parser, Debug)]
#[command(name = "listing-grep")]
#[command(version)]
#[command(about = "Search object-store listings for files containing a pattern", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Listing front-end that root-relative paths are appended to
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Base path from which to begin the recursive search
    #[arg(long, value_name = "PATH")]
    url: Option<String>,

    /// File name in which to search for the pattern
    #[arg(long)]
    file_name: Option<String>,

    /// Text pattern to search for in files (not a regex)
    #[arg(long)]
    pattern: Option<String>,

    /// User-Agent header to send
    #[arg(long)]
    user_agent: Option<String>,

    /// Print crawl statistics after the results
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error logging
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.listing.base_url = base_url.clone();
        }
        if let Some(root) = &self.url {
            config.search.root = root.clone();
        }
        if let Some(file_name) = &self.file_name {
            config.search.file_name = file_name.clone();
        }
        if let Some(pattern) = &self.pattern {
            config.search.pattern = pattern.clone();
        }
        if let Some(user_agent) = &self.user_agent {
            config.http.user_agent = Some(user_agent.clone());
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    cli.apply_overrides(&mut config);
    validate(&config).context("invalid configuration")?;

    let mut sink = ConsoleSink::stdout();
    let report = crawl(&config, &mut sink).await?;

    if cli.stats {
        println!();
        print_report(&report);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only results.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("listing_grep=info,warn"),
            1 => EnvFilter::new("listing_grep=debug,info"),
            2 => EnvFilter::new("listing_grep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
