//! Core data types for the dvora resolution engine
//!
//! Contains the parsed template, verdict and report structures used
//! throughout the library.

use serde::{Deserialize, Serialize};

/// How spaces in the search term are re-encoded before appending it to a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    /// Leading `+` on the line: spaces become `+`
    Plus,
    /// Leading `-` on the line: spaces become `-`
    Minus,
    /// No prefix: the term is appended verbatim
    None,
}

/// Which matcher a template is resolved with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SiteKind {
    /// Freeform HTML search page
    Html,
    /// JSON search API; `base` is everything before `/searching?q=`
    Api { base: String },
    /// Carries the API query marker but the host does not have the API shape
    MalformedApi,
}

/// A single parsed catalog line
///
/// Immutable once parsed. `url_prefix` has the separator directive already stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteTemplate {
    /// URL prefix the encoded term is appended to
    pub url_prefix: String,

    /// Separator directive taken from the leading character
    pub separator: Separator,

    /// Structural classification of `url_prefix`
    pub kind: SiteKind,
}

/// Tri-state outcome of resolving one template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// Title is listed; API sites also carry a URL for manual follow-up
    Found { result_url: Option<String> },
    /// Site answered and the title is not there
    NotFound,
    /// Site could not be checked
    Error { message: String },
}

impl Verdict {
    pub fn is_found(&self) -> bool {
        matches!(self, Verdict::Found { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Verdict::Error { .. })
    }
}

/// Verdict attributed to one catalog line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteReport {
    /// Zero-based position among the non-blank lines of the catalog
    pub index: usize,

    /// Concrete URL that was requested
    pub url: String,

    pub verdict: Verdict,
}

/// Category-level aggregate emitted after the last line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub checked: usize,
    pub found: usize,
    pub not_found: usize,
    pub errors: usize,
}

impl CategorySummary {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Self::default()
        }
    }

    /// Count one verdict. Errors are tallied apart from `not_found`.
    pub fn record(&mut self, verdict: &Verdict) {
        self.checked += 1;
        match verdict {
            Verdict::Found { .. } => self.found += 1,
            Verdict::NotFound => self.not_found += 1,
            Verdict::Error { .. } => self.errors += 1,
        }
    }

    pub fn found_any(&self) -> bool {
        self.found > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_serialization() {
        let verdict = Verdict::Found {
            result_url: Some("https://ww4.example.to/search?keyword=the+matrix".to_string()),
        };
        let json = serde_json::to_string(&verdict).expect("Serialization should succeed");
        assert_eq!(
            json,
            r#"{"verdict":"found","result_url":"https://ww4.example.to/search?keyword=the+matrix"}"#
        );

        let json = serde_json::to_string(&Verdict::NotFound).expect("Serialization should succeed");
        assert_eq!(json, r#"{"verdict":"not_found"}"#);
    }

    #[test]
    fn test_site_report_roundtrip() {
        let report = SiteReport {
            index: 3,
            url: "https://example.com/?s=dune".to_string(),
            verdict: Verdict::Error {
                message: "HTTP request failed: timeout".to_string(),
            },
        };

        let json = serde_json::to_string(&report).expect("Serialization should succeed");
        let deserialized: SiteReport =
            serde_json::from_str(&json).expect("Deserialization should succeed");

        assert_eq!(report, deserialized);
    }

    #[test]
    fn test_summary_keeps_errors_apart() {
        let mut summary = CategorySummary::new("movies");
        summary.record(&Verdict::NotFound);
        summary.record(&Verdict::Error {
            message: "503".to_string(),
        });

        assert_eq!(summary.checked, 2);
        assert_eq!(summary.not_found, 1);
        assert_eq!(summary.errors, 1);
        assert!(!summary.found_any());

        summary.record(&Verdict::Found { result_url: None });
        assert!(summary.found_any());
    }
}
