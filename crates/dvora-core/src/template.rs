//! URL templating
//!
//! Turns raw catalog lines into [`SiteTemplate`]s and expands them with a
//! search term. Also builds the request and follow-up URLs for API sites.

use crate::classify::{classify, API_QUERY_SEGMENT};
use crate::types::{Separator, SiteTemplate};

/// Fixed pagination appended to every API search request
const API_PAGINATION: &str = "&limit=40&offset=0";

/// Human-facing search path on API sites
const RESULT_SEARCH_PATH: &str = "/search?keyword=";

/// Parses one raw catalog line
///
/// # Returns
/// `None` for lines that are blank after trimming, otherwise the parsed template
///
/// # Example
/// ```
/// use dvora_core::template::parse_line;
/// use dvora_core::Separator;
/// let template = parse_line("  -https://example.com/title/  ").unwrap();
/// assert_eq!(template.url_prefix, "https://example.com/title/");
/// assert_eq!(template.separator, Separator::Minus);
/// assert!(parse_line("   ").is_none());
/// ```
pub fn parse_line(line: &str) -> Option<SiteTemplate> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (separator, url_prefix) = if let Some(rest) = line.strip_prefix('+') {
        (Separator::Plus, rest)
    } else if let Some(rest) = line.strip_prefix('-') {
        (Separator::Minus, rest)
    } else {
        (Separator::None, line)
    };

    Some(SiteTemplate {
        url_prefix: url_prefix.to_string(),
        separator,
        kind: classify(url_prefix),
    })
}

/// Re-encodes spaces in the term according to the separator directive
pub fn encode_term(term: &str, separator: Separator) -> String {
    match separator {
        Separator::Plus => term.replace(' ', "+"),
        Separator::Minus => term.replace(' ', "-"),
        Separator::None => term.to_string(),
    }
}

impl SiteTemplate {
    /// Concatenates the prefix with the encoded term, nothing in between
    ///
    /// # Example
    /// ```
    /// use dvora_core::template::parse_line;
    /// let template = parse_line("+https://example.com/search?s=").unwrap();
    /// assert_eq!(template.expand("The Matrix"), "https://example.com/search?s=The+Matrix");
    /// ```
    pub fn expand(&self, term: &str) -> String {
        format!("{}{}", self.url_prefix, encode_term(term, self.separator))
    }
}

/// Builds the JSON search request URL for an API base
///
/// # Example
/// ```
/// use dvora_core::template::build_api_url;
/// let url = build_api_url("https://ww4.fmovies.co", "the matrix");
/// assert_eq!(url, "https://ww4.fmovies.co/searching?q=the+matrix&limit=40&offset=0");
/// ```
pub fn build_api_url(base: &str, term: &str) -> String {
    format!(
        "{}{}{}{}",
        base,
        API_QUERY_SEGMENT,
        encode_term(term, Separator::Plus),
        API_PAGINATION
    )
}

/// Builds the conventional search page URL handed out for manual follow-up
///
/// Each word is percent-encoded and words are joined with `+`.
///
/// # Example
/// ```
/// use dvora_core::template::build_result_url;
/// let url = build_result_url("https://ww4.fmovies.co", "Fast & Furious");
/// assert_eq!(url, "https://ww4.fmovies.co/search?keyword=Fast+%26+Furious");
/// ```
pub fn build_result_url(base: &str, term: &str) -> String {
    let keyword = term
        .split(' ')
        .map(|word| urlencoding::encode(word).into_owned())
        .collect::<Vec<_>>()
        .join("+");
    format!("{}{}{}", base, RESULT_SEARCH_PATH, keyword)
}
