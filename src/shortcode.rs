//! Short code derivation
//!
//! A short code is the first 8 lowercase hex characters of the MD5 digest of
//! the long URL's UTF-8 bytes. The same URL always yields the same code.

use std::fmt;

use md5::{Digest, Md5};

/// Number of hex characters kept from the digest
pub const SHORT_CODE_LEN: usize = 8;

/// An 8-character lowercase hex identifier for a long URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortCode(String);

impl ShortCode {
    /// Derives the short code for `long_url` from its content digest.
    ///
    /// # Example
    ///
    /// ```
    /// # use hashlink::shortcode::ShortCode;
    /// let code = ShortCode::from_url("https://example.com");
    /// assert_eq!(code.as_str(), "c984d06a");
    /// ```
    pub fn from_url(long_url: &str) -> Self {
        let digest = Md5::digest(long_url.as_bytes());
        let mut encoded = hex::encode(digest);
        encoded.truncate(SHORT_CODE_LEN);
        Self(encoded)
    }

    /// Parses a code taken from a request path.
    ///
    /// Returns `None` unless `raw` is exactly 8 lowercase hex characters,
    /// i.e. something `from_url` could have produced.
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = raw.len() == SHORT_CODE_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));

        well_formed.then(|| Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
