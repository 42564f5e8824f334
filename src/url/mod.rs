//! URL handling for listing-grep
//!
//! Listing pages link with root-relative paths, so every location has to be
//! resolved against the configured base URL before it can be fetched. The
//! resolved form is also what the crawler keys its visited sets on.

mod location;
mod normalize;

pub use location::resolve_location;
pub use normalize::visit_key;
