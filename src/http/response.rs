//! Response builders.
//!
//! # Responsibilities
//! - Build the fixed not-found response returned when no route matches
//! - Small text/JSON builders for handlers
//!
//! # Design Decisions
//! - Custom status text travels as `hyper::ext::ReasonPhrase` so the
//!   HTTP/1 encoder writes "404 not found" on the wire

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use hyper::ext::ReasonPhrase;

pub const NOT_FOUND_BODY: &str = "resource not found";
pub const NOT_FOUND_REASON: &str = "not found";
pub const TEXT_PLAIN: &str = "text/plain";
const TEXT_PLAIN_UTF8: &str = "text/plain;charset=UTF-8";
pub const APPLICATION_JSON: &str = "application/json";

/// The response for requests no route accepts.
pub fn not_found() -> Response {
    let mut response = Response::new(Body::from(NOT_FOUND_BODY));
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
    response
        .extensions_mut()
        .insert(ReasonPhrase::from_static(NOT_FOUND_REASON.as_bytes()));
    response
}

/// A 200 plain-text response.
pub fn text(body: impl Into<String>) -> Response {
    let mut response = Response::new(Body::from(body.into()));
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN_UTF8));
    response
}

/// A 200 JSON response.
pub fn json(value: &serde_json::Value) -> Response {
    let mut response = Response::new(Body::from(value.to_string()));
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    response
}

/// The custom status text attached to a response, if any.
pub fn reason_phrase(response: &Response) -> Option<&str> {
    response
        .extensions()
        .get::<ReasonPhrase>()
        .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok())
}
