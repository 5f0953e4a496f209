//! Request handling: favicon vs. the landing page.
//!
//! Every path gets the same HTML asset so magic-link and OAuth callback URLs
//! can be opened directly; the page parses its own query parameters.

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::{self, HeaderValue};
use hyper::{Request, Response, StatusCode};
use std::path::Path;

use super::access;

/// The one path that does not get the page.
pub const FAVICON_PATH: &str = "/favicon.ico";

/// Handle one request. Never fails: read errors become a 500 and the server
/// keeps running.
pub async fn handle(req: Request<Incoming>, asset: &Path) -> Response<Full<Bytes>> {
    access::log_request(req.method(), req.uri());

    if req.uri().path() == FAVICON_PATH {
        return no_content();
    }

    match tokio::fs::read(asset).await {
        Ok(bytes) => page(bytes),
        Err(err) => {
            eprintln!("error: could not read {}: {err}", asset.display());
            server_error()
        }
    }
}

/// 200 with the page bytes, cache-disabling and hardening headers.
fn page(bytes: Vec<u8>) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(bytes)));
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response
}

/// 204 for the favicon.
fn no_content() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = StatusCode::NO_CONTENT;
    response
}

/// Generic 500; details go to stderr, not the client.
fn server_error() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(b"internal server error\n")));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    response
}
