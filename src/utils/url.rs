// src/utils/url.rs

//! URL manipulation utilities.

use url::Url;

use crate::error::{AppError, Result};
use crate::locale::Locale;

/// Join an endpoint path onto a base URL, keeping any path prefix of the base.
///
/// # Examples
/// ```
/// use unisite::utils::url::join_endpoint;
///
/// let url = join_endpoint("https://example.kg/backend/", "/api/news/").unwrap();
/// assert_eq!(url.as_str(), "https://example.kg/backend/api/news/");
/// ```
pub fn join_endpoint(base: &str, path: &str) -> Result<Url> {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    Ok(Url::parse(&format!("{base}/{path}"))?)
}

/// URL of a single record below a listing URL: `{listing}{id}/`.
///
/// The id becomes one percent-encoded path segment. Empty ids, dot
/// segments and ids containing `/` are rejected.
pub fn detail_url(listing: &Url, id: &str) -> Result<Url> {
    let id = id.trim();
    if id.is_empty() || id == "." || id == ".." || id.contains('/') {
        return Err(AppError::validation(format!("invalid record id '{id}'")));
    }

    let mut target = listing.clone();
    target
        .path_segments_mut()
        .map_err(|_| AppError::validation(format!("{listing} cannot hold a record id")))?
        .pop_if_empty()
        .push(id)
        .push("");
    Ok(target)
}

/// Append the backend `lang` parameter for `locale`.
pub fn with_lang(mut url: Url, locale: Locale) -> Url {
    url.query_pairs_mut().append_pair("lang", locale.wire_code());
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_without_prefix() {
        let url = join_endpoint("http://localhost:8000", "/api/announcements/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/announcements/");
    }

    #[test]
    fn test_join_tolerates_slashes() {
        let url = join_endpoint("http://localhost:8000/", "api/news/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/news/");
    }

    #[test]
    fn test_join_rejects_invalid_base() {
        assert!(join_endpoint("not a url", "/api/").is_err());
    }

    #[test]
    fn test_detail_url() {
        let listing = join_endpoint("http://localhost:8000", "/api/news/").unwrap();
        assert_eq!(
            detail_url(&listing, "42").unwrap().as_str(),
            "http://localhost:8000/api/news/42/"
        );

        let bare = join_endpoint("http://localhost:8000", "/api/news").unwrap();
        assert_eq!(
            detail_url(&bare, " 42 ").unwrap().as_str(),
            "http://localhost:8000/api/news/42/"
        );
    }

    #[test]
    fn test_detail_url_rejects_dot_segments_and_slashes() {
        let listing = join_endpoint("http://localhost:8000", "/api/news/").unwrap();
        for id in ["", "  ", ".", "..", "../x", "1/2"] {
            assert!(detail_url(&listing, id).is_err(), "{id:?} accepted");
        }
    }

    #[test]
    fn test_detail_url_encodes_id() {
        let listing = join_endpoint("http://localhost:8000", "/api/news/").unwrap();
        let url = detail_url(&listing, "a b?c#d").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/news/a%20b%3Fc%23d/");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_with_lang_uses_wire_code() {
        let url = join_endpoint("http://localhost:8000", "/api/schedule/subsections/").unwrap();
        let url = with_lang(url, Locale::Kg);
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/schedule/subsections/?lang=ky"
        );
    }
}
