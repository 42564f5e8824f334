use crate::{UrlError, UrlResult};
use url::Url;

/// Turns a location into the absolute URL that gets fetched
///
/// An absolute HTTP(S) location is used as is. Anything else is treated as a
/// path under `base` and appended to it with exactly one slash between the
/// two, so a base carrying a path prefix keeps that prefix.
///
/// # Examples
///
/// ```
/// use listing_grep::url::resolve_location;
/// use url::Url;
///
/// let base = Url::parse("http://gcsweb.k8s.io/").unwrap();
/// let url = resolve_location(&base, "/gcs/bucket/logs/").unwrap();
/// assert_eq!(url.as_str(), "http://gcsweb.k8s.io/gcs/bucket/logs/");
/// ```
pub fn resolve_location(base: &Url, location: &str) -> UrlResult<Url> {
    let location = location.trim();

    if location.is_empty() {
        return Err(UrlError::Parse("empty location".to_string()));
    }

    match Url::parse(location) {
        Ok(url) => {
            if url.scheme() == "http" || url.scheme() == "https" {
                Ok(url)
            } else {
                Err(UrlError::InvalidScheme(format!(
                    "Only HTTP and HTTPS locations can be fetched, got: {}",
                    url.scheme()
                )))
            }
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let joined = format!(
                "{}/{}",
                base.as_str().trim_end_matches('/'),
                location.trim_start_matches('/')
            );
            Url::parse(&joined).map_err(|e| UrlError::Parse(format!("{}: {}", joined, e)))
        }
        Err(e) => Err(UrlError::Parse(format!("{}: {}", location, e))),
    }
}
