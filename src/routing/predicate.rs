//! Request predicates.
//!
//! # Responsibilities
//! - Match the request method (case-insensitive)
//! - Match a header value (exact, repeated values joined with ", ")
//! - Match the request path against a regular expression (full path)
//!
//! # Design Decisions
//! - Method tokens stay plain strings so custom verbs work
//! - Host/referrer helpers lower-case the expected value, nothing else does
//! - Path patterns are never anchored; the first match must equal the path
//! - Patterns compile at construction so bad ones fail at registration

use std::fmt;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use regex::Regex;

use crate::routing::error::{RouterError, RouterResult};

pub const CONNECT: &str = "connect";
pub const DELETE: &str = "delete";
pub const GET: &str = "get";
pub const HEAD: &str = "head";
pub const OPTIONS: &str = "options";
pub const PATCH: &str = "patch";
pub const POST: &str = "post";
pub const PUT: &str = "put";
pub const TRACE: &str = "trace";

/// A predicate shared between route tables.
pub type SharedPredicate = Arc<dyn Predicate>;

/// Trait for testing one property of a request.
pub trait Predicate: Send + Sync {
    /// Returns true if the request satisfies this predicate.
    fn test(&self, req: &Request<Body>) -> bool;

    /// Wrap the predicate for storage in a route.
    fn shared(self) -> SharedPredicate
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

impl<F> Predicate for F
where
    F: Fn(&Request<Body>) -> bool + Send + Sync,
{
    fn test(&self, req: &Request<Body>) -> bool {
        self(req)
    }
}

/// Matches the request method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodIs {
    method: String,
}

impl MethodIs {
    /// Create a method predicate. Any token is accepted.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into().to_ascii_lowercase(),
        }
    }
}

impl Predicate for MethodIs {
    fn test(&self, req: &Request<Body>) -> bool {
        req.method().as_str().eq_ignore_ascii_case(&self.method)
    }
}

/// Matches a header against an exact value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEquals {
    name: String,
    value: String,
}

impl HeaderEquals {
    /// Create a header predicate. Both name and value are taken as given.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Predicate for HeaderEquals {
    fn test(&self, req: &Request<Body>) -> bool {
        let mut values = req.headers().get_all(self.name.as_str()).iter();
        let Some(first) = values.next() else {
            return false;
        };

        let mut joined = first.as_bytes().to_vec();
        for value in values {
            joined.extend_from_slice(b", ");
            joined.extend_from_slice(value.as_bytes());
        }
        joined == self.value.as_bytes()
    }
}

/// Matches the full request path against a regular expression.
#[derive(Clone)]
pub struct PathMatches {
    pattern: Regex,
}

impl PathMatches {
    /// Compile a path predicate.
    pub fn new(pattern: &str) -> RouterResult<Self> {
        let pattern = Regex::new(pattern).map_err(|source| RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern })
    }

    /// True if the first match in `path` covers all of it.
    pub fn is_match(&self, path: &str) -> bool {
        self.pattern
            .find(path)
            .is_some_and(|m| m.as_str() == path)
    }
}

impl Predicate for PathMatches {
    fn test(&self, req: &Request<Body>) -> bool {
        self.is_match(req.uri().path())
    }
}

impl fmt::Debug for PathMatches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathMatches")
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

pub fn method(method: impl Into<String>) -> MethodIs {
    MethodIs::new(method)
}

pub fn connect() -> MethodIs {
    MethodIs::new(CONNECT)
}

pub fn delete() -> MethodIs {
    MethodIs::new(DELETE)
}

pub fn get() -> MethodIs {
    MethodIs::new(GET)
}

pub fn head() -> MethodIs {
    MethodIs::new(HEAD)
}

pub fn options() -> MethodIs {
    MethodIs::new(OPTIONS)
}

pub fn patch() -> MethodIs {
    MethodIs::new(PATCH)
}

pub fn post() -> MethodIs {
    MethodIs::new(POST)
}

pub fn put() -> MethodIs {
    MethodIs::new(PUT)
}

pub fn trace() -> MethodIs {
    MethodIs::new(TRACE)
}

pub fn header(name: impl Into<String>, value: impl Into<String>) -> HeaderEquals {
    HeaderEquals::new(name, value)
}

/// Matches the `host` header. The expected host is lower-cased.
pub fn host(host: &str) -> HeaderEquals {
    HeaderEquals::new("host", host.to_lowercase())
}

/// Matches the `referrer` header. The expected value is lower-cased.
pub fn referrer(referrer: &str) -> HeaderEquals {
    HeaderEquals::new("referrer", referrer.to_lowercase())
}

pub fn path(pattern: &str) -> RouterResult<PathMatches> {
    PathMatches::new(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::default())
            .unwrap()
    }

    #[test]
    fn test_method_case_insensitive() {
        let matcher = get();
        assert!(matcher.test(&request("GET", "/")));
        assert!(matcher.test(&request("Get", "/")));
        assert!(matcher.test(&request("get", "/")));
        assert!(!matcher.test(&request("POST", "/")));

        assert!(method("DELETE").test(&request("delete", "/")));
    }

    #[test]
    fn test_method_custom_verb() {
        let matcher = method("purge");
        assert!(matcher.test(&request("PURGE", "/cache")));
        assert!(!matcher.test(&request("GET", "/cache")));
    }

    #[test]
    fn test_header_exact() {
        let matcher = header("X-Api-Key", "secret");

        let req1 = Request::builder()
            .header("x-api-key", "secret")
            .body(Body::default())
            .unwrap();
        assert!(matcher.test(&req1));

        let req2 = Request::builder()
            .header("x-api-key", "SECRET")
            .body(Body::default())
            .unwrap();
        assert!(!matcher.test(&req2));

        assert!(!matcher.test(&request("GET", "/")));
    }

    #[test]
    fn test_header_repeated_values_joined() {
        let req = Request::builder()
            .header("x-k", "a")
            .header("x-k", "b")
            .body(Body::default())
            .unwrap();

        assert!(header("x-k", "a, b").test(&req));
        assert!(!header("x-k", "a").test(&req));
        assert!(!header("x-k", "b").test(&req));
    }

    #[test]
    fn test_header_invalid_name_never_matches() {
        let matcher = header("bad header", "x");
        assert!(!matcher.test(&request("GET", "/")));
    }

    #[test]
    fn test_host_lowercases_expected() {
        let matcher = host("Example.COM");

        let req1 = Request::builder()
            .header("Host", "example.com")
            .body(Body::default())
            .unwrap();
        assert!(matcher.test(&req1));

        // only the expected value is normalized
        let req2 = Request::builder()
            .header("Host", "EXAMPLE.COM")
            .body(Body::default())
            .unwrap();
        assert!(!matcher.test(&req2));
    }

    #[test]
    fn test_referrer() {
        let matcher = referrer("Docs.Example.com");
        let req = Request::builder()
            .header("referrer", "docs.example.com")
            .body(Body::default())
            .unwrap();
        assert!(matcher.test(&req));
    }

    #[test]
    fn test_path_full_match() {
        let matcher = path(".*/foo").unwrap();
        assert!(matcher.test(&request("GET", "/api/v2/foo")));
        assert!(matcher.test(&request("GET", "http://example.com/foo?x=1")));
        assert!(!matcher.test(&request("GET", "/api/v2/foo/bar")));
        assert!(!matcher.test(&request("GET", "/nothing")));
    }

    #[test]
    fn test_path_leading_chars_rejected() {
        let matcher = path("/foo").unwrap();
        assert!(matcher.test(&request("GET", "/foo")));
        assert!(!matcher.test(&request("GET", "/api/foo")));
    }

    #[test]
    fn test_path_not_auto_anchored() {
        // leftmost-first picks "/a", which is not the whole path
        let matcher = path("/a|/ab").unwrap();
        assert!(matcher.is_match("/a"));
        assert!(!matcher.is_match("/ab"));
    }

    #[test]
    fn test_path_invalid_pattern() {
        let err = path("/foo(").unwrap_err();
        match err {
            RouterError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "/foo("),
        }
    }

    #[test]
    fn test_closure_predicate() {
        let matcher = |req: &Request<Body>| req.uri().query().is_some();
        assert!(matcher.test(&request("GET", "/search?q=rust")));
        assert!(!matcher.test(&request("GET", "/search")));
    }
}
