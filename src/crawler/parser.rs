//! Listing parser and link extraction
//!
//! A listing page is parsed once into a [`ListingDocument`], then queried
//! with [`extract_links`] and a [`LinkFilter`] deciding which hyperlink
//! targets to keep. The crawler queries every listing twice: once for
//! candidate files and once for sub-directories.

use scraper::Html;

/// Attribute carrying a link's target
pub const HREF: &str = "href";

/// A parsed directory-listing page
///
/// Lives only as long as it takes to pull the links out of it.
#[derive(Debug)]
pub struct ListingDocument {
    html: Html,
}

impl ListingDocument {
    /// Parses listing markup
    ///
    /// The HTML parser recovers from malformed markup, so this never fails.
    pub fn parse(markup: &str) -> Self {
        let html = Html::parse_document(markup);
        if !html.errors.is_empty() {
            tracing::trace!("Recovered from {} markup errors", html.errors.len());
        }
        Self { html }
    }

    /// Parses a raw response body
    ///
    /// Invalid UTF-8 sequences become U+FFFD, so an odd object name or a
    /// binary body still parses and keeps whatever links it has.
    pub fn from_bytes(body: &[u8]) -> Self {
        Self::parse(&String::from_utf8_lossy(body))
    }
}

/// Decides whether one attribute of an element is a link worth keeping
///
/// Any `Fn(&str, &str) -> bool` closure taking the attribute key and value
/// works as a filter.
pub trait LinkFilter {
    fn accepts(&self, key: &str, value: &str) -> bool;
}

impl<F> LinkFilter for F
where
    F: Fn(&str, &str) -> bool,
{
    fn accepts(&self, key: &str, value: &str) -> bool {
        self(key, value)
    }
}

/// Keeps links whose target ends with a file name
///
/// The comparison is a case-sensitive suffix match on the raw attribute
/// value.
#[derive(Debug, Clone, Copy)]
pub struct FileLinkFilter<'a> {
    pub file_name: &'a str,
}

impl LinkFilter for FileLinkFilter<'_> {
    fn accepts(&self, key: &str, value: &str) -> bool {
        key == HREF && value.ends_with(self.file_name)
    }
}

/// Keeps links that descend from the listing currently being crawled
///
/// A link qualifies when it contains the current location and carries no
/// query string; listings also render sort and paging links back to
/// themselves, and those all have one.
#[derive(Debug, Clone, Copy)]
pub struct SubdirectoryFilter<'a> {
    pub location: &'a str,
}

impl LinkFilter for SubdirectoryFilter<'_> {
    fn accepts(&self, key: &str, value: &str) -> bool {
        key == HREF && value.contains(self.location) && !value.contains('?')
    }
}

/// Returns the attribute values the filter accepts, in document order
///
/// Elements are visited in pre-order: an element before its children,
/// children left to right. Each element contributes at most one value, from
/// the first attribute the filter accepts.
///
/// # Example
///
/// ```
/// use listing_grep::crawler::{extract_links, FileLinkFilter, ListingDocument};
///
/// let doc = ListingDocument::parse(
///     r#"<ul><li><a href="/logs/run1/serial-1.log">log</a></li><li><a href="/logs/run2/">run2</a></li></ul>"#,
/// );
/// let files = extract_links(&doc, &FileLinkFilter { file_name: "serial-1.log" });
/// assert_eq!(files, vec!["/logs/run1/serial-1.log".to_string()]);
/// ```
pub fn extract_links(document: &ListingDocument, filter: &dyn LinkFilter) -> Vec<String> {
    document
        .html
        .tree
        .root()
        .descendants()
        .filter_map(|node| node.value().as_element())
        .filter_map(|element| {
            element
                .attrs()
                .find(|(key, value)| filter.accepts(key, value))
                .map(|(_, value)| value.to_string())
        })
        .collect()
}
