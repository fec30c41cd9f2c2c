//! Resolution of request paths against a session's base URL.

use url::Url;

use crate::error::SessionError;

/// Resolve `path` against the optional `base` URL.
///
/// An empty path yields the base URL unchanged. Any other path goes through
/// standard relative reference resolution (RFC 3986), so absolute URLs
/// resolve to themselves and need no base at all.
///
/// # Panics
/// Panics when `path` is empty and no base URL is configured: the session
/// was never set up for the call being made.
pub fn resolve_url(base: Option<&Url>, path: &str) -> Result<Url, SessionError> {
    if path.is_empty() {
        return match base {
            Some(url) => Ok(url.clone()),
            None => panic!("cannot request an empty path when the base url is not set"),
        };
    }

    let resolved = match base {
        Some(base) => base.join(path),
        None => Url::parse(path),
    };
    resolved.map_err(|source| SessionError::InvalidPath {
        path: path.to_string(),
        source,
    })
}
