use url::Url;

/// Builds the key a resolved location is remembered under
///
/// Two links that reach the same listing or file through different
/// spellings must produce the same key, otherwise a listing that links back
/// to an ancestor would be crawled forever.
///
/// # Normalization Steps
///
/// 1. Drop the fragment
/// 2. Collapse repeated slashes and `.` segments in the path
/// 3. Apply `..` segments
/// 4. Keep a trailing slash: on an object store `logs` and `logs/` differ
///
/// The host is already lowercased by the URL parser. The query string is
/// kept as is.
///
/// # Examples
///
/// ```
/// use listing_grep::url::visit_key;
/// use url::Url;
///
/// let url = Url::parse("http://Example.COM//logs/./run1/#top").unwrap();
/// assert_eq!(visit_key(&url), "http://example.com/logs/run1/");
/// ```
pub fn visit_key(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);

    let normalized_path = normalize_path(url.path());
    url.set_path(&normalized_path);

    url.to_string()
}

/// Removes empty and dot segments while preserving a trailing slash
fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    let mut normalized_segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                normalized_segments.pop();
            }
            _ => normalized_segments.push(segment),
        }
    }

    if normalized_segments.is_empty() {
        return "/".to_string();
    }

    let mut result = format!("/{}", normalized_segments.join("/"));
    if path.ends_with('/') {
        result.push('/');
    }
    result
}
