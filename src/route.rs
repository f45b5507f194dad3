//! Route definitions for the URL shortener
//!
//! Builds the Axum router and holds the state injected into every handler.

use axum::routing::{get, post};
use axum::Router;

use crate::handler::{redirect_url, shorten_form, shorten_query};
use crate::service::ShortCodeStore;

/// Application state shared across all request handlers
///
/// Constructed once at startup and cloned into each request.
#[derive(Clone)]
pub struct AppState {
    pub store: ShortCodeStore,
    /// Prefix for generated short URLs; `None` uses the request `Host`
    pub base_url: Option<String>,
}

/// Creates the Axum router with all routes
///
/// # Route Definitions
///
/// - `POST /shorten` - Get or create a short URL from the `url` form field
/// - `GET /create?url=...` - Same, from the query string
/// - `GET /{code}` - Redirect to the original URL
///
/// # Example Usage
///
/// ```no_run
/// # use std::sync::Arc;
/// # use hashlink::route::{create_app, AppState};
/// # use hashlink::service::ShortCodeStore;
/// # use hashlink::store::MemoryStore;
/// let state = AppState {
///     store: ShortCodeStore::new(Arc::new(MemoryStore::new())),
///     base_url: None,
/// };
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/shorten", post(shorten_form))
        .route("/create", get(shorten_query))
        // Public redirect endpoint
        .route("/{code}", get(redirect_url))
        .with_state(state)
}
