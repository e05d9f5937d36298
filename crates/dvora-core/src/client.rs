//! HTTP client for site checks
//!
//! One request per site, bounded by a timeout, always carrying the
//! configured User-Agent. Non-2xx statuses are errors, never absences.

use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT};
use tracing::debug;

use crate::error::{DvoraError, Result};

/// Browser User-Agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration for the HTTP client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 10)
    pub timeout_secs: u64,
    /// User-Agent header sent verbatim on every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP client wrapper shared by the HTML and API matchers
///
/// Holds no mutable state; cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct DvoraClient {
    client: reqwest::Client,
}

impl DvoraClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent)
            .build()
            .map_err(DvoraError::HttpError)?;

        Ok(Self { client })
    }

    /// Fetch an HTML page
    ///
    /// # Errors
    /// - `HttpError` - Connection failure, timeout or unreadable body
    /// - `Status` - Server answered with a non-2xx status
    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        self.fetch(url, None).await
    }

    /// Fetch a JSON API response body, sending `Accept: application/json`
    ///
    /// # Errors
    /// Same as [`DvoraClient::fetch_html`]
    pub async fn fetch_json(&self, url: &str) -> Result<String> {
        self.fetch(url, Some(HeaderValue::from_static("application/json")))
            .await
    }

    /// Perform a single GET attempt
    async fn fetch(&self, url: &str, accept: Option<HeaderValue>) -> Result<String> {
        let mut request = self.client.get(url);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }

        debug!(url, "fetching");
        let response = request.send().await.map_err(DvoraError::HttpError)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DvoraError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(DvoraError::HttpError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_client_creation() {
        let client = DvoraClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_with_custom_config() {
        let config = ClientConfig {
            timeout_secs: 3,
            user_agent: "dvora-test/1.0".to_string(),
        };
        let client = DvoraClient::with_config(config);
        assert!(client.is_ok());
    }
}
