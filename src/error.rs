//! Error types for the store, the shortening service and configuration

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failure of the underlying mapping store
///
/// A lookup that finds nothing is not an error; stores report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] redb::Error),

    #[error("corrupt record for {code}: {source}")]
    Corrupt {
        code: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Lifts any of redb's per-operation errors into a `StoreError`.
    pub(crate) fn db(err: impl Into<redb::Error>) -> Self {
        Self::Database(err.into())
    }
}

/// Errors surfaced by `shorten` / `resolve`
#[derive(Debug, Error)]
pub enum ShortenError {
    /// Empty or missing long URL (client error)
    #[error("Missing URL")]
    MissingUrl,

    /// No mapping for the requested short code
    #[error("URL not found")]
    NotFound(String),

    /// Stored URL cannot be sent as a `Location` header
    #[error("stored URL for {0} is not a valid redirect target")]
    UnusableTarget(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ShortenError {
    fn into_response(self) -> Response {
        match self {
            ShortenError::MissingUrl => (StatusCode::BAD_REQUEST, "Missing URL").into_response(),
            ShortenError::NotFound(code) => {
                tracing::debug!(%code, "short code not found");
                (StatusCode::NOT_FOUND, "URL not found").into_response()
            }
            ShortenError::UnusableTarget(code) => {
                tracing::error!(%code, "stored URL is not a valid Location header");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            ShortenError::Store(err) => {
                tracing::error!(error = %err, "store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Invalid environment configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT value: {0:?}")]
    InvalidPort(String),

    #[error("unknown STORE_BACKEND {0:?} (expected \"redb\" or \"memory\")")]
    UnknownBackend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            ShortenError::MissingUrl.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ShortenError::NotFound("deadbeef".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ShortenError::Store(StoreError::LockPoisoned).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
