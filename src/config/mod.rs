//! Configuration module for listing-grep
//!
//! Settings come from three layers: built-in defaults, an optional TOML
//! file, and command-line overrides applied by the binary.
//!
//! # Example
//!
//! ```no_run
//! use listing_grep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("listing-grep.toml")).unwrap();
//! println!("Searching for {} under {}", config.search.file_name, config.search.root);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, HttpConfig, ListingConfig, SearchRequest, DEFAULT_BASE_URL, DEFAULT_FILE_NAME,
    DEFAULT_PATTERN, DEFAULT_ROOT,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
