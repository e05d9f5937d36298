//! Site matchers
//!
//! Resolves one template against one term: the API matcher queries a JSON
//! search endpoint, the HTML matcher inspects the links of a search page.

use tracing::debug;

use crate::client::{ClientConfig, DvoraClient};
use crate::error::{DvoraError, Result};
use crate::parser::{assess_html, find_title_match, parse_api_response};
use crate::pattern::MatchPatterns;
use crate::template::{build_api_url, build_result_url};
use crate::types::{SiteKind, SiteTemplate, Verdict};

/// Successful outcome of a single site check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence {
    /// Title is listed; API sites hand back a follow-up URL
    Found(Option<String>),
    /// Site answered and does not list the title
    Absent,
}

impl From<Result<Presence>> for Verdict {
    fn from(result: Result<Presence>) -> Self {
        match result {
            Ok(Presence::Found(result_url)) => Verdict::Found { result_url },
            Ok(Presence::Absent) => Verdict::NotFound,
            Err(e) => Verdict::Error {
                message: e.to_string(),
            },
        }
    }
}

/// Runs the matcher a template's kind calls for
///
/// Stateless apart from the HTTP client, so one resolver can serve
/// any number of concurrent checks.
#[derive(Debug, Clone)]
pub struct SiteResolver {
    client: DvoraClient,
}

impl SiteResolver {
    /// Create a new resolver with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new resolver with custom client configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: DvoraClient::with_config(config)?,
        })
    }

    /// URL that will be requested for a template
    pub fn request_url(template: &SiteTemplate, term: &str) -> String {
        match &template.kind {
            SiteKind::Api { base } => build_api_url(base, term),
            SiteKind::Html | SiteKind::MalformedApi => template.expand(term),
        }
    }

    /// Resolves one template
    ///
    /// # Arguments
    /// * `template` - Parsed catalog line
    /// * `term` - Raw search term
    /// * `patterns` - Match tiers compiled once for `term`
    pub async fn resolve(
        &self,
        template: &SiteTemplate,
        term: &str,
        patterns: &MatchPatterns,
    ) -> Result<Presence> {
        match &template.kind {
            SiteKind::Api { base } => self.check_api(base, term).await,
            SiteKind::Html => self.check_html(&template.expand(term), patterns).await,
            SiteKind::MalformedApi => Err(DvoraError::MalformedApiTemplate(
                template.url_prefix.clone(),
            )),
        }
    }

    /// Queries a JSON search API and matches the term against returned titles
    ///
    /// # Arguments
    /// * `base` - API base URL, everything before `/searching?q=`
    /// * `term` - Raw search term
    ///
    /// # Returns
    /// `Found` with a follow-up search URL on the first title containing the
    /// term (case-insensitive), `Absent` when no title does
    ///
    /// # Errors
    /// - `HttpError` / `Status` - Transport failure or non-2xx status
    /// - `ParseError` - Body is not the expected JSON
    pub async fn check_api(&self, base: &str, term: &str) -> Result<Presence> {
        let url = build_api_url(base, term);
        let body = self.client.fetch_json(&url).await?;
        let response = parse_api_response(&body)?;

        match find_title_match(&response, term) {
            Some(record) => {
                debug!(base, title = %record.title, "API title matched");
                Ok(Presence::Found(Some(build_result_url(base, term))))
            }
            None => {
                debug!(base, records = response.data.len(), "no API title matched");
                Ok(Presence::Absent)
            }
        }
    }

    /// Fetches a search page and looks for links naming the title
    ///
    /// # Arguments
    /// * `url` - Fully expanded search URL
    /// * `patterns` - Match tiers compiled for the search term
    ///
    /// # Errors
    /// - `HttpError` / `Status` - Transport failure or non-2xx status
    /// - `ParseError` - Page could not be inspected
    pub async fn check_html(&self, url: &str, patterns: &MatchPatterns) -> Result<Presence> {
        let body = self.client.fetch_html(url).await?;
        let evidence = assess_html(&body, patterns)?;
        debug!(url, ?evidence, "assessed search page");

        if evidence.is_found() {
            Ok(Presence::Found(None))
        } else {
            Ok(Presence::Absent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::parse_line;

    #[test]
    fn test_verdict_from_presence() {
        assert_eq!(
            Verdict::from(Ok(Presence::Found(None))),
            Verdict::Found { result_url: None }
        );
        assert_eq!(Verdict::from(Ok(Presence::Absent)), Verdict::NotFound);
    }

    #[test]
    fn test_verdict_from_error() {
        let verdict = Verdict::from(Err(DvoraError::ParseError("bad".to_string())));
        assert_eq!(
            verdict,
            Verdict::Error {
                message: "Failed to parse response: bad".to_string()
            }
        );
    }

    #[test]
    fn test_request_url_api_and_html() {
        let api = parse_line("https://ww4.fmovies.co/searching?q=").unwrap();
        assert_eq!(
            SiteResolver::request_url(&api, "the matrix"),
            "https://ww4.fmovies.co/searching?q=the+matrix&limit=40&offset=0"
        );

        let html = parse_line("-https://example.com/movie/").unwrap();
        assert_eq!(
            SiteResolver::request_url(&html, "the matrix"),
            "https://example.com/movie/the-matrix"
        );
    }

    #[tokio::test]
    async fn test_malformed_api_is_error_not_html() {
        let resolver = SiteResolver::new().unwrap();
        let template = parse_line("http://ww4.fmovies.co/searching?q=").unwrap();
        let patterns = MatchPatterns::new("the matrix").unwrap();

        let result = resolver.resolve(&template, "the matrix", &patterns).await;
        assert!(matches!(result, Err(DvoraError::MalformedApiTemplate(_))));
    }
}
