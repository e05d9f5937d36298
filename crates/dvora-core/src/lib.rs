//! Dvora Core Library
//!
//! Decides whether a movie or show title is available on a list of
//! configured streaming sites.
//!
//! # Overview
//!
//! Each catalog line is a URL prefix, optionally marked with a leading `+` or
//! `-` saying how spaces in the title are encoded. For every line the engine:
//! - expands the prefix with the encoded title ([`template`])
//! - classifies the site as a JSON search API or an HTML page ([`classify`])
//! - fetches once, with a timeout and the configured User-Agent
//! - returns a [`Verdict`]: found, not found, or error
//!
//! HTML pages are judged by their links: any non-noise `href` matching one of
//! the title's pattern tiers means found, even when the page also says
//! "no results". API sites are judged by case-insensitive title containment.
//!
//! # Example
//!
//! ```no_run
//! use dvora_core::{ResolutionDriver, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let driver = ResolutionDriver::new()?;
//!     let catalog = ["+https://example.com/search?s=", "-https://example.org/title/"];
//!
//!     let summary = driver
//!         .run_category("movies", &catalog, "The Matrix", |report| {
//!             println!("{}: {:?}", report.url, report.verdict);
//!         })
//!         .await?;
//!
//!     println!("found on {} of {} sites", summary.found, summary.checked);
//!     Ok(())
//! }
//! ```

mod classify;
mod client;
mod driver;
mod error;
mod matcher;
pub mod parser;
pub mod pattern;
pub mod template;
mod types;

// Re-export classifier
pub use classify::{classify, API_QUERY_SEGMENT};

// Re-export client types
pub use client::{ClientConfig, DvoraClient, DEFAULT_USER_AGENT};

// Re-export driver API
pub use driver::{load_catalog, Requirement, ResolutionDriver};

// Re-export error types
pub use error::{DvoraError, Result};

// Re-export matchers
pub use matcher::{Presence, SiteResolver};

// Re-export pattern helpers
pub use pattern::{is_noise, MatchPatterns};

// Re-export data types
pub use types::{CategorySummary, Separator, SiteKind, SiteReport, SiteTemplate, Verdict};

// Re-export templating helpers for convenience
pub use template::{build_api_url, build_result_url, encode_term, parse_line};
