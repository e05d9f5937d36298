//! Site classification
//!
//! Decides structurally whether a template targets a JSON search API
//! (`https://ww<digits>.<domain>.<tld>/searching?q=`) or a plain HTML page.

use regex::Regex;

use crate::types::SiteKind;

/// Query segment every search API template carries
pub const API_QUERY_SEGMENT: &str = "/searching?q=";

const API_PATTERN: &str = r"^(https://ww\d+\.[a-zA-Z0-9\-]+\.[a-zA-Z]+)/searching\?q=";

/// Classifies a template URL prefix
///
/// Any host with the numbered-subdomain shape is an API site; there is no
/// host list. A prefix carrying [`API_QUERY_SEGMENT`] whose host does not have
/// that shape is [`SiteKind::MalformedApi`], never HTML.
///
/// # Example
/// ```
/// use dvora_core::{classify, SiteKind};
/// assert_eq!(
///     classify("https://ww4.fmovies.co/searching?q="),
///     SiteKind::Api { base: "https://ww4.fmovies.co".to_string() }
/// );
/// assert_eq!(classify("https://example.com/search?s="), SiteKind::Html);
/// ```
pub fn classify(url_prefix: &str) -> SiteKind {
    if !url_prefix.contains(API_QUERY_SEGMENT) {
        return SiteKind::Html;
    }

    match extract_api_base(url_prefix) {
        Some(base) => SiteKind::Api { base },
        None => SiteKind::MalformedApi,
    }
}

/// Returns the part of an API template preceding `/searching?q=`
fn extract_api_base(url_prefix: &str) -> Option<String> {
    let re = Regex::new(API_PATTERN).ok()?;
    let caps = re.captures(url_prefix)?;
    caps.get(1).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_plain_html() {
        assert_eq!(classify("https://example.com/search?s="), SiteKind::Html);
        assert_eq!(classify("https://ww2.example.com/search?q="), SiteKind::Html);
    }

    #[test]
    fn test_classify_api_any_host() {
        assert_eq!(
            classify("https://ww19.some-site.net/searching?q="),
            SiteKind::Api {
                base: "https://ww19.some-site.net".to_string()
            }
        );
    }

    #[test]
    fn test_classify_api_with_trailing_params() {
        assert_eq!(
            classify("https://ww4.123movies.la/searching?q=x&limit=40&offset=0"),
            SiteKind::Api {
                base: "https://ww4.123movies.la".to_string()
            }
        );
    }

    #[test]
    fn test_classify_malformed_api() {
        assert_eq!(
            classify("http://ww4.fmovies.co/searching?q="),
            SiteKind::MalformedApi
        );
        assert_eq!(
            classify("https://www.fmovies.co/searching?q="),
            SiteKind::MalformedApi
        );
        assert_eq!(
            classify("https://ww4.fmovies.co/api/searching?q="),
            SiteKind::MalformedApi
        );
    }
}
