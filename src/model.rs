//! Data models for the URL shortener
//!
//! The stored mapping record plus the request shapes accepted by the HTTP
//! handlers.

use serde::{Deserialize, Serialize};

/// A short code to long URL mapping, as persisted by the store
///
/// Serialized with the document field names used by the persisted table:
///
/// ```json
/// { "id": "c984d06a", "redirect_url": "https://example.com" }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    /// 8-character hex short code, also the lookup key
    #[serde(rename = "id")]
    pub short_code: String,

    /// The original URL, stored exactly as submitted
    #[serde(rename = "redirect_url")]
    pub long_url: String,
}

/// Input for creating a short URL
///
/// Accepted both as the `POST /shorten` form body and as the
/// `GET /create?url=...` query string. A missing field deserializes to `None`
/// so the handler can answer with 400 instead of an extractor rejection.
#[derive(Deserialize, Debug, Default)]
pub struct ShortenParams {
    pub url: Option<String>,
}
