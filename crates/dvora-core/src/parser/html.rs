//! HTML search page parser
//!
//! Extracts every `href` in a document and decides whether the page
//! shows the searched title, falling back to "no results" wording.

use scraper::{Html, Selector};

use crate::error::{DvoraError, Result};
use crate::pattern::MatchPatterns;

/// Lower-case phrases a search page uses to say it found nothing
const NO_RESULTS_PHRASES: &[&str] = &[
    "no result found.",
    "no result found",
    "no results found",
    "no results",
    "nothing found",
    "not found",
    "no matches",
    "0 results",
    "could not find",
    "couldn't find",
    "search returned no results",
    "sorry, no results",
    "no items found",
    "your search did not match",
    "did not match any",
    "no search results",
];

/// What a fetched page says about the searched title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlEvidence {
    /// At least one non-noise link matched a pattern tier
    MatchingLinks(usize),
    /// No matching link and the page text carries a "no results" phrase
    NoResultsText,
    /// Neither signal present
    NoEvidence,
}

impl HtmlEvidence {
    /// Matching links win over any negative wording on the same page
    pub fn is_found(&self) -> bool {
        matches!(self, HtmlEvidence::MatchingLinks(_))
    }
}

/// Collects the `href` of every element in document order
///
/// Not limited to anchors; duplicates are kept.
///
/// # Errors
/// Returns `ParseError` if the selector cannot be built
pub fn extract_links(document: &Html) -> Result<Vec<String>> {
    let selector = Selector::parse("[href]")
        .map_err(|e| DvoraError::ParseError(format!("Invalid selector: {:?}", e)))?;

    Ok(document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect())
}

/// Concatenated, lower-cased text of every text node
fn page_text(document: &Html) -> String {
    document
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Checks lower-cased page text for any "no results" phrase
pub fn has_no_results(text_lower: &str) -> bool {
    NO_RESULTS_PHRASES
        .iter()
        .any(|phrase| text_lower.contains(phrase))
}

/// Parses a search page and weighs its evidence
///
/// Links are checked first; page text is only scanned when no link matched.
///
/// # Arguments
/// * `html` - Raw HTML body of the search page
/// * `patterns` - Match tiers compiled for the search term
///
/// # Errors
/// Returns `ParseError` if the link selector cannot be built
pub fn assess_html(html: &str, patterns: &MatchPatterns) -> Result<HtmlEvidence> {
    let document = Html::parse_document(html);
    let links = extract_links(&document)?;

    let matches = patterns.count_matches(&links);
    if matches > 0 {
        return Ok(HtmlEvidence::MatchingLinks(matches));
    }

    if has_no_results(&page_text(&document)) {
        return Ok(HtmlEvidence::NoResultsText);
    }

    Ok(HtmlEvidence::NoEvidence)
}
