//! Resolution driver
//!
//! Loads catalogs and runs every template of a category against a term,
//! streaming one report per line and summarizing the category at the end.

use std::io::ErrorKind;
use std::path::Path;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::client::ClientConfig;
use crate::error::{DvoraError, Result};
use crate::matcher::SiteResolver;
use crate::pattern::MatchPatterns;
use crate::template::parse_line;
use crate::types::{CategorySummary, SiteReport, SiteTemplate, Verdict};

/// Whether a missing catalog aborts its category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Missing file is a configuration error
    Required,
    /// Missing file means an empty catalog
    Optional,
}

/// Reads a catalog file into raw lines
///
/// # Errors
/// - `Config` - Required catalog does not exist
/// - `Io` - Catalog exists but cannot be read
pub async fn load_catalog(path: impl AsRef<Path>, requirement: Requirement) -> Result<Vec<String>> {
    let path = path.as_ref();

    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(content.lines().map(str::to_string).collect()),
        Err(e) if e.kind() == ErrorKind::NotFound => match requirement {
            Requirement::Optional => {
                debug!(path = %path.display(), "optional catalog missing, skipping");
                Ok(Vec::new())
            }
            Requirement::Required => Err(DvoraError::Config(format!(
                "File {} not found!",
                path.display()
            ))),
        },
        Err(source) => Err(DvoraError::Io {
            path: path.display().to_string(),
            source,
        }),
    }
}

/// Drives categories of templates through the resolver
#[derive(Debug, Clone)]
pub struct ResolutionDriver {
    resolver: SiteResolver,
    concurrency: usize,
}

impl ResolutionDriver {
    /// Create a sequential driver with default client configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a sequential driver with custom client configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            resolver: SiteResolver::with_config(config)?,
            concurrency: 1,
        })
    }

    /// Allow up to `concurrency` sites in flight
    ///
    /// Reports are still emitted in catalog order. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Runs one category and reports each verdict as soon as it is in order
    ///
    /// Blank lines are skipped and produce no report. Per-site failures become
    /// [`Verdict::Error`] and never stop the run.
    ///
    /// # Arguments
    /// * `category` - Name used in logs and the summary
    /// * `lines` - Raw catalog lines
    /// * `term` - Raw search term
    /// * `on_report` - Called once per non-blank line, in input order
    ///
    /// # Errors
    /// Returns `InvalidPattern` if the term's match tiers cannot be compiled
    pub async fn run_category<S, F>(
        &self,
        category: &str,
        lines: &[S],
        term: &str,
        mut on_report: F,
    ) -> Result<CategorySummary>
    where
        S: AsRef<str>,
        F: FnMut(&SiteReport),
    {
        let patterns = MatchPatterns::new(term)?;
        let templates: Vec<SiteTemplate> = lines
            .iter()
            .filter_map(|line| parse_line(line.as_ref()))
            .collect();

        info!(category, sites = templates.len(), term, "resolving category");

        let resolver = &self.resolver;
        let patterns = &patterns;
        let reports = stream::iter(templates.into_iter().enumerate())
            .map(|(index, template)| async move {
                let url = SiteResolver::request_url(&template, term);
                debug!(%url, "checking");
                let verdict = Verdict::from(resolver.resolve(&template, term, patterns).await);
                SiteReport {
                    index,
                    url,
                    verdict,
                }
            })
            .buffered(self.concurrency);
        let mut reports = std::pin::pin!(reports);

        let mut summary = CategorySummary::new(category);
        while let Some(report) = reports.next().await {
            match &report.verdict {
                Verdict::Found { .. } => info!(url = %report.url, "found"),
                Verdict::NotFound => info!(url = %report.url, "not found"),
                Verdict::Error { message } => warn!(url = %report.url, %message, "site check failed"),
            }
            summary.record(&report.verdict);
            on_report(&report);
        }

        info!(
            category,
            found = summary.found,
            not_found = summary.not_found,
            errors = summary.errors,
            "category complete"
        );
        Ok(summary)
    }

    /// Runs one category and collects the reports
    pub async fn collect_category<S: AsRef<str>>(
        &self,
        category: &str,
        lines: &[S],
        term: &str,
    ) -> Result<(Vec<SiteReport>, CategorySummary)> {
        let mut reports = Vec::new();
        let summary = self
            .run_category(category, lines, term, |report| reports.push(report.clone()))
            .await?;
        Ok((reports, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_catalog_optional_missing() {
        let dir = tempfile::tempdir().unwrap();
        let lines = load_catalog(dir.path().join("api_sites.txt"), Requirement::Optional)
            .await
            .unwrap();
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn test_load_catalog_required_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_catalog(dir.path().join("shows.txt"), Requirement::Required).await;
        match result {
            Err(DvoraError::Config(msg)) => assert!(msg.contains("shows.txt")),
            _ => panic!("Expected Config error"),
        }
    }

    #[tokio::test]
    async fn test_load_catalog_reads_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "+https://example.com/search?s=").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "-https://example.org/title/").unwrap();

        let lines = load_catalog(file.path(), Requirement::Required).await.unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "");
    }

    #[test]
    fn test_concurrency_floor() {
        let driver = ResolutionDriver::new().unwrap().with_concurrency(0);
        assert_eq!(driver.concurrency(), 1);
    }

    #[tokio::test]
    async fn test_blank_catalog_yields_empty_summary() {
        let driver = ResolutionDriver::new().unwrap();
        let lines = ["", "   ", "\t"];
        let (reports, summary) = driver
            .collect_category("shows", &lines, "the matrix")
            .await
            .unwrap();
        assert!(reports.is_empty());
        assert_eq!(summary.checked, 0);
        assert!(!summary.found_any());
    }
}
