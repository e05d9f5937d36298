//! Report formatting
//!
//! Human-readable lines by default, one JSON object per line with `--json`.

use serde::Serialize;
use tracing::warn;

use dvora_core::{CategorySummary, SiteReport, Verdict};

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event<'a> {
    Site {
        category: &'a str,
        #[serde(flatten)]
        report: &'a SiteReport,
    },
    Summary(&'a CategorySummary),
    CategoryError {
        category: &'a str,
        message: String,
    },
    Manual {
        number: usize,
        url: &'a str,
    },
}

/// Prints reports for one search term
pub struct Reporter {
    term: String,
    json: bool,
}

impl Reporter {
    pub fn new(term: impl Into<String>, json: bool) -> Self {
        Self {
            term: term.into(),
            json,
        }
    }

    fn emit(&self, event: &Event<'_>) {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => warn!(error = %e, "failed to encode report"),
        }
    }

    pub fn category_start(&self, category: &str) {
        if !self.json {
            println!("\nSearching for '{}' in {}:", self.term, category);
        }
    }

    pub fn site(&self, category: &str, report: &SiteReport) {
        if self.json {
            self.emit(&Event::Site { category, report });
            return;
        }

        println!("{}", format_site(&self.term, report));
    }

    pub fn summary(&self, summary: &CategorySummary) {
        if self.json {
            self.emit(&Event::Summary(summary));
            return;
        }

        if let Some(line) = format_summary(&self.term, summary) {
            println!("{}", line);
        }
    }

    pub fn category_error(&self, category: &str, error: &dvora_core::DvoraError) {
        if self.json {
            self.emit(&Event::CategoryError {
                category,
                message: error.to_string(),
            });
            return;
        }

        eprintln!("Skipping {}: {}", category, error);
    }

    pub fn manual_checks(&self, urls: &[String]) {
        if self.json {
            for (i, url) in urls.iter().enumerate() {
                self.emit(&Event::Manual { number: i + 1, url });
            }
            return;
        }

        let rule = "=".repeat(60);
        println!("\n{}\nMANUAL CHECKS:\n", rule);
        if urls.is_empty() {
            println!("No URLs found in the manual checks catalog");
        }
        for (i, url) in urls.iter().enumerate() {
            println!("{}. {}", i + 1, url);
        }
        println!("\n{}", rule);
    }
}

fn format_site(term: &str, report: &SiteReport) -> String {
    match &report.verdict {
        Verdict::Found {
            result_url: Some(result_url),
        } => format!(
            "Checking: {}\n✓ Found '{}' on this site! {}",
            report.url, term, result_url
        ),
        Verdict::Found { result_url: None } => {
            format!("Checking: {}\n✓ Found '{}' on this site!", report.url, term)
        }
        Verdict::NotFound => format!(
            "Checking: {}\n✗ '{}' not found on this site.",
            report.url, term
        ),
        Verdict::Error { message } => {
            format!("Checking: {}\nError checking {}: {}", report.url, report.url, message)
        }
    }
}

fn format_summary(term: &str, summary: &CategorySummary) -> Option<String> {
    if summary.found_any() {
        return None;
    }
    if summary.checked > 0 && summary.errors == summary.checked {
        return Some(format!(
            "'{}' could not be checked on any of the sites ({} errors).",
            term, summary.errors
        ));
    }

    let mut line = format!("'{}' was not found on any of the sites.", term);
    if summary.errors > 0 {
        line.push_str(&format!(
            " ({} of {} sites could not be checked)",
            summary.errors, summary.checked
        ));
    }
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(verdict: Verdict) -> SiteReport {
        SiteReport {
            index: 0,
            url: "https://example.com/?s=dune".to_string(),
            verdict,
        }
    }

    #[test]
    fn test_format_site_found_with_url() {
        let line = format_site(
            "dune",
            &report(Verdict::Found {
                result_url: Some("https://ww1.x.to/search?keyword=dune".to_string()),
            }),
        );
        assert!(line.ends_with("✓ Found 'dune' on this site! https://ww1.x.to/search?keyword=dune"));
    }

    #[test]
    fn test_format_site_error() {
        let line = format_site(
            "dune",
            &report(Verdict::Error {
                message: "timeout".to_string(),
            }),
        );
        assert!(line.ends_with("Error checking https://example.com/?s=dune: timeout"));
    }

    #[test]
    fn test_format_summary_found_is_silent() {
        let mut summary = CategorySummary::new("movies");
        summary.record(&Verdict::Found { result_url: None });
        assert_eq!(format_summary("dune", &summary), None);
    }

    #[test]
    fn test_format_summary_counts_errors_separately() {
        let mut summary = CategorySummary::new("movies");
        summary.record(&Verdict::NotFound);
        summary.record(&Verdict::Error {
            message: "503".to_string(),
        });
        assert_eq!(
            format_summary("dune", &summary).unwrap(),
            "'dune' was not found on any of the sites. (1 of 2 sites could not be checked)"
        );
    }

    #[test]
    fn test_format_summary_all_errors() {
        let mut summary = CategorySummary::new("movies");
        for _ in 0..3 {
            summary.record(&Verdict::Error {
                message: "timeout".to_string(),
            });
        }
        assert_eq!(
            format_summary("dune", &summary).unwrap(),
            "'dune' could not be checked on any of the sites (3 errors)."
        );
    }

    #[test]
    fn test_site_event_json() {
        let report = report(Verdict::NotFound);
        let event = Event::Site {
            category: "movies",
            report: &report,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"event":"site","category":"movies","index":0,"url":"https://example.com/?s=dune","verdict":{"verdict":"not_found"}}"#
        );
    }
}
