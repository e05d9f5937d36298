//! Link matching patterns
//!
//! Builds the tiered regex cascade for a search term and filters out
//! links that must never count as a hit (social share, mail, account pages).

use regex::Regex;

use crate::error::Result;

/// Substrings marking links that are never evidence of a title
const NOISE_DENYLIST: &[&str] = &[
    "addtoany.com",
    "facebook.com",
    "twitter.com",
    "reddit.com",
    "pinterest.com",
    "whatsapp.com",
    "t.me",
    "mailto:",
    "/login",
    "/register",
    "/signup",
];

/// Inter-word gap for the exact-boundary tier
const GAP_TIGHT: &str = r"[\s\-\+\.]+";
/// Inter-word gap that also spans path separators
const GAP_PATH: &str = r"[\s\-\+\./]+";
/// Inter-word gap that also swallows digits
const GAP_LOOSE: &str = r"[\s\-\+\./\d]+";

/// Returns true if a lower-cased link is on the noise denylist
pub fn is_noise(link_lower: &str) -> bool {
    NOISE_DENYLIST
        .iter()
        .any(|needle| link_lower.contains(needle))
}

/// Compiled match tiers for one search term, tightest first
///
/// Built once per term and reused across every link of a page.
#[derive(Debug, Clone)]
pub struct MatchPatterns {
    tiers: Vec<Regex>,
}

impl MatchPatterns {
    /// Compiles the cascade for a term
    ///
    /// Words are the whitespace-split, lower-cased term with regex
    /// metacharacters escaped. A term with no words yields no tiers,
    /// so nothing ever matches.
    ///
    /// # Errors
    /// Returns `InvalidPattern` if a tier fails to compile
    pub fn new(term: &str) -> Result<Self> {
        let words: Vec<String> = term
            .to_lowercase()
            .split_whitespace()
            .map(regex::escape)
            .collect();

        if words.is_empty() {
            return Ok(Self { tiers: Vec::new() });
        }

        let sources = [
            format!(
                r"(?:^|[^a-z0-9]){}(?:$|[^a-z0-9])",
                words.join(GAP_TIGHT)
            ),
            words.join(GAP_PATH),
            format!(".*{}.*", words.join(GAP_LOOSE)),
        ];

        let tiers = sources
            .iter()
            .map(|source| Regex::new(source))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { tiers })
    }

    /// True when the term had no words
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Index of the first tier matching a lower-cased link
    pub fn match_tier(&self, link_lower: &str) -> Option<usize> {
        self.tiers.iter().position(|re| re.is_match(link_lower))
    }

    /// Counts links that survive the noise filter and match any tier
    pub fn count_matches<S: AsRef<str>>(&self, links: &[S]) -> usize {
        if self.is_empty() {
            return 0;
        }

        links
            .iter()
            .map(|link| link.as_ref().to_lowercase())
            .filter(|link| !is_noise(link))
            .filter(|link| self.match_tier(link).is_some())
            .count()
    }
}
