//! Response parsers
//!
//! Pure functions over fetched bodies: HTML link and text extraction,
//! and JSON search API decoding.

pub mod api;
pub mod html;

pub use api::{find_title_match, parse_api_response, ApiRecord, ApiResponse};
pub use html::{assess_html, extract_links, has_no_results, HtmlEvidence};
