//! Short code assignment and lookup
//!
//! [`ShortCodeStore`] implements get-or-create over whichever [`UrlStore`]
//! backend it was built with.

use std::sync::Arc;

use crate::error::ShortenError;
use crate::model::UrlMapping;
use crate::shortcode::ShortCode;
use crate::store::{InsertOutcome, UrlStore};

/// Get-or-create mapping service shared by all request handlers
#[derive(Clone)]
pub struct ShortCodeStore {
    backend: Arc<dyn UrlStore>,
}

impl ShortCodeStore {
    pub fn new(backend: Arc<dyn UrlStore>) -> Self {
        Self { backend }
    }

    /// Returns the short code for `long_url`, creating the mapping on first use.
    ///
    /// The code is derived from the URL alone, so repeated calls return the
    /// same code and store at most one mapping. When a mapping already exists
    /// under the code it is returned as-is, even if it was stored for a
    /// different URL that happens to share the digest prefix.
    pub fn shorten(&self, long_url: &str) -> Result<ShortCode, ShortenError> {
        if long_url.is_empty() {
            return Err(ShortenError::MissingUrl);
        }

        let code = ShortCode::from_url(long_url);

        if let Some(existing) = self.backend.find(&code)? {
            if existing.long_url != long_url {
                tracing::warn!(
                    %code,
                    stored = %existing.long_url,
                    requested = %long_url,
                    "short code collision, keeping stored mapping"
                );
            } else {
                tracing::debug!(%code, "short code already mapped");
            }
            return Ok(code);
        }

        let mapping = UrlMapping {
            short_code: code.to_string(),
            long_url: long_url.to_owned(),
        };

        match self.backend.insert(&mapping)? {
            InsertOutcome::Inserted => {
                tracing::info!(%code, url = %long_url, "created short code");
            }
            // Another request inserted the same code between find and insert.
            InsertOutcome::AlreadyExists => {
                tracing::debug!(%code, "lost insert race, mapping already stored");
            }
        }

        Ok(code)
    }

    /// Looks up the long URL stored for `short_code`.
    ///
    /// Codes that `shorten` could never have produced are reported as not
    /// found without querying the backend.
    pub fn resolve(&self, short_code: &str) -> Result<String, ShortenError> {
        let Some(code) = ShortCode::parse(short_code) else {
            return Err(ShortenError::NotFound(short_code.to_owned()));
        };

        match self.backend.find(&code)? {
            Some(mapping) => Ok(mapping.long_url),
            None => Err(ShortenError::NotFound(code.into_string())),
        }
    }

    pub fn mapping_count(&self) -> Result<usize, ShortenError> {
        Ok(self.backend.count()?)
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }
}
