//! HTTP request handlers for the URL shortener
//!
//! - `POST /shorten` / `GET /create` get or create the short code for a URL
//! - `GET /{code}` redirects to the stored URL

use std::convert::Infallible;

use axum::{
    extract::{rejection::QueryRejection, FromRequest, Multipart, Path, Query, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Form,
};

use crate::error::ShortenError;
use crate::model::ShortenParams;
use crate::route::AppState;

/// `url` field of a `POST /shorten` body
///
/// Reads `application/x-www-form-urlencoded` and `multipart/form-data`
/// bodies. Any other body (no content type, unreadable form) yields `None`,
/// which the handler answers with 400 `Missing URL`.
pub struct PostedUrl(pub Option<String>);

impl<S> FromRequest<S> for PostedUrl
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.starts_with("multipart/form-data"));

        if is_multipart {
            let Ok(mut multipart) = Multipart::from_request(req, state).await else {
                return Ok(Self(None));
            };

            while let Ok(Some(field)) = multipart.next_field().await {
                if field.name() == Some("url") {
                    return Ok(Self(field.text().await.ok()));
                }
            }
            return Ok(Self(None));
        }

        match Form::<ShortenParams>::from_request(req, state).await {
            Ok(Form(params)) => Ok(Self(params.url)),
            Err(rejection) => {
                tracing::debug!(%rejection, "unreadable shorten form");
                Ok(Self(None))
            }
        }
    }
}

/// Creates (or retrieves) the short URL for the `url` form field
///
/// This handler:
/// 1. Reads `url` from a urlencoded or multipart form body
/// 2. Derives the short code and stores the mapping if it is new
/// 3. Returns the short URL as plain text
///
/// # Request Body
///
/// `application/x-www-form-urlencoded`: `url=https%3A%2F%2Fexample.com`
///
/// # Response
///
/// - **200 OK** - plain text `http://<host>/<code>`
/// - **400 Bad Request** - `Missing URL` (no field, empty field, or no form body)
/// - **500 Internal Server Error** - store failure
pub async fn shorten_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    PostedUrl(url): PostedUrl,
) -> Result<String, ShortenError> {
    shorten(&state, &headers, url)
}

/// Creates (or retrieves) the short URL for the `url` query parameter
///
/// This handler:
/// 1. Reads `url` from the query string (`GET /create?url=...`)
/// 2. Derives the short code and stores the mapping if it is new
/// 3. Returns the short URL as plain text
///
/// # Response
///
/// - **200 OK** - plain text `http://<host>/<code>`
/// - **400 Bad Request** - `Missing URL` (no parameter, empty value, or an
///   unparsable query string)
/// - **500 Internal Server Error** - store failure
pub async fn shorten_query(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ShortenParams>, QueryRejection>,
) -> Result<String, ShortenError> {
    let url = query.ok().and_then(|Query(params)| params.url);
    shorten(&state, &headers, url)
}

fn shorten(state: &AppState, headers: &HeaderMap, url: Option<String>) -> Result<String, ShortenError> {
    let long_url = url.unwrap_or_default();
    let code = state.store.shorten(&long_url)?;

    Ok(format!("{}/{}", short_url_prefix(state, headers), code))
}

/// Configured `BASE_URL`, else `http://` plus the request's `Host` header
fn short_url_prefix(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(base_url) = &state.base_url {
        return base_url.clone();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");

    format!("http://{}", host)
}

/// Redirects a short code to its original URL
///
/// # Response
///
/// - **308 Permanent Redirect** - `Location` is the stored URL
/// - **404 Not Found** - `URL not found`; a miss never redirects
/// - **500 Internal Server Error** - store failure, or a stored URL that is
///   not a valid header value
pub async fn redirect_url(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ShortenError> {
    let long_url = state.store.resolve(&code)?;

    // Stored URLs are unvalidated; anything with control characters cannot
    // go into a Location header.
    let location = HeaderValue::from_bytes(long_url.as_bytes())
        .map_err(|_| ShortenError::UnusableTarget(code.clone()))?;
    tracing::debug!(%code, url = %long_url, "redirecting");

    Ok((StatusCode::PERMANENT_REDIRECT, [(header::LOCATION, location)]))
}
