//! # Request ID Tracking
//!
//! Identifiers attached to every HTTP request.
//! Uses CUID2 for collision-resistant, URL-safe identifiers.

use std::{fmt, str::FromStr};

/// Header carrying the request id in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MIN_LEN: usize = 20;
const MAX_LEN: usize = 64;

/// A request ID type using CUID2.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random request ID.
    #[inline]
    pub fn new() -> Self { Self(cuid2::create_id()) }

    /// Get the request ID as a string.
    #[inline]
    pub fn as_str(&self) -> &str { &self.0 }

    /// Consume and return the inner string.
    #[inline]
    pub fn into_string(self) -> String { self.0 }

    /// Accept a client supplied id if it is well formed.
    ///
    /// Ids must be 20 to 64 characters of ASCII letters, digits, `-` or `_`.
    pub fn try_from_header(value: &str) -> Option<Self> {
        let value = value.trim();
        let well_formed = (MIN_LEN ..= MAX_LEN).contains(&value.len()) &&
            value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        well_formed.then(|| Self(value.to_string()))
    }

    /// Use the header value when well formed, otherwise generate a new id.
    pub fn from_header_or_new(value: Option<&str>) -> Self {
        value
            .and_then(Self::try_from_header)
            .unwrap_or_default()
    }
}

impl Default for RequestId {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl FromStr for RequestId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_header(s).ok_or_else(|| "Invalid request ID format".to_string())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}
