//! JSON search API parser
//!
//! Decodes `/searching?q=` responses and matches the term against titles.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DvoraError, Result};

/// Reads `null` as the type's default, so an empty listing stays empty
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One search hit returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRecord {
    /// Display title
    #[serde(rename = "t", default, deserialize_with = "null_as_default")]
    pub title: String,

    /// URL slug
    #[serde(rename = "s", default)]
    pub slug: Option<String>,

    /// Content type ("m" movie, "s" series)
    #[serde(rename = "d", default)]
    pub kind: Option<String>,

    /// Release year
    #[serde(rename = "y", default)]
    pub year: Option<i32>,
}

/// Full search API response
///
/// The pagination block is not read; only `data` decides presence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<ApiRecord>,
}

/// Decodes a search API body
///
/// # Errors
/// Returns `ParseError` if the body is not the expected JSON shape
pub fn parse_api_response(body: &str) -> Result<ApiResponse> {
    serde_json::from_str(body)
        .map_err(|e| DvoraError::ParseError(format!("invalid API response: {}", e)))
}

/// Returns the first record whose title contains the term, ignoring case
pub fn find_title_match<'a>(response: &'a ApiResponse, term: &str) -> Option<&'a ApiRecord> {
    let needle = term.to_lowercase();
    response
        .data
        .iter()
        .find(|record| record.title.to_lowercase().contains(&needle))
}
