//! Route table, lookup and dispatch.
//!
//! # Responsibilities
//! - Store routes in registration order
//! - Look up the first route whose predicates all pass
//! - Invoke the matched handler or answer with the fixed 404
//!
//! # Design Decisions
//! - Append-only table; earlier routes shadow later identical ones
//! - `resolve` is a pure lookup (no state changes, no logging)
//! - Routes share predicates and handlers behind `Arc`, so cloning a
//!   table for a snapshot swap is cheap
//! - O(routes × predicates) scan, acceptable for edge-function tables

use std::fmt;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use futures_util::future;

use crate::http::response;
use crate::routing::error::RouterResult;
use crate::routing::handler::{Handler, HandlerFuture};
use crate::routing::predicate::{self, MethodIs, PathMatches, Predicate, SharedPredicate};

/// A predicate conjunction bound to one handler.
#[derive(Clone)]
pub struct Route {
    predicates: Vec<SharedPredicate>,
    handler: Arc<dyn Handler>,
}

impl Route {
    pub fn new<H: Handler>(predicates: Vec<SharedPredicate>, handler: H) -> Self {
        Self {
            predicates,
            handler: Arc::new(handler),
        }
    }

    /// Returns true if every predicate accepts the request.
    /// A route without predicates accepts everything.
    pub fn matches(&self, req: &Request<Body>) -> bool {
        self.predicates.iter().all(|p| p.test(req))
    }

    /// Invoke the handler.
    pub fn call(&self, req: Request<Body>) -> HandlerFuture {
        self.handler.call(req)
    }

    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("predicates", &self.predicates.len())
            .finish_non_exhaustive()
    }
}

/// Ordered route table.
#[derive(Clone, Default, Debug)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route. Never fails and never checks for conflicts.
    pub fn handle<H: Handler>(&mut self, predicates: Vec<SharedPredicate>, handler: H) -> &mut Self {
        self.routes.push(Route::new(predicates, handler));
        self
    }

    pub fn connect<H: Handler>(&mut self, pattern: &str, handler: H) -> RouterResult<&mut Self> {
        self.method_route(predicate::CONNECT, pattern, handler)
    }

    pub fn delete<H: Handler>(&mut self, pattern: &str, handler: H) -> RouterResult<&mut Self> {
        self.method_route(predicate::DELETE, pattern, handler)
    }

    pub fn get<H: Handler>(&mut self, pattern: &str, handler: H) -> RouterResult<&mut Self> {
        self.method_route(predicate::GET, pattern, handler)
    }

    pub fn head<H: Handler>(&mut self, pattern: &str, handler: H) -> RouterResult<&mut Self> {
        self.method_route(predicate::HEAD, pattern, handler)
    }

    pub fn options<H: Handler>(&mut self, pattern: &str, handler: H) -> RouterResult<&mut Self> {
        self.method_route(predicate::OPTIONS, pattern, handler)
    }

    pub fn patch<H: Handler>(&mut self, pattern: &str, handler: H) -> RouterResult<&mut Self> {
        self.method_route(predicate::PATCH, pattern, handler)
    }

    pub fn post<H: Handler>(&mut self, pattern: &str, handler: H) -> RouterResult<&mut Self> {
        self.method_route(predicate::POST, pattern, handler)
    }

    pub fn put<H: Handler>(&mut self, pattern: &str, handler: H) -> RouterResult<&mut Self> {
        self.method_route(predicate::PUT, pattern, handler)
    }

    pub fn trace<H: Handler>(&mut self, pattern: &str, handler: H) -> RouterResult<&mut Self> {
        self.method_route(predicate::TRACE, pattern, handler)
    }

    /// Register a method-agnostic route.
    pub fn all<H: Handler>(&mut self, pattern: &str, handler: H) -> RouterResult<&mut Self> {
        let predicates = vec![PathMatches::new(pattern)?.shared()];
        Ok(self.handle(predicates, handler))
    }

    fn method_route<H: Handler>(
        &mut self,
        method: &str,
        pattern: &str,
        handler: H,
    ) -> RouterResult<&mut Self> {
        let predicates = vec![MethodIs::new(method).shared(), PathMatches::new(pattern)?.shared()];
        Ok(self.handle(predicates, handler))
    }

    /// Find the earliest registered route that accepts the request.
    pub fn resolve(&self, req: &Request<Body>) -> Option<&Route> {
        self.routes.iter().find(|route| route.matches(req))
    }

    /// Dispatch the request to the first matching route.
    ///
    /// The handler's future is returned as is, including its errors. Without
    /// a match the future is already complete with the not-found response.
    pub fn route(&self, req: Request<Body>) -> HandlerFuture {
        match self.resolve(&req) {
            Some(route) => {
                tracing::trace!(
                    method = %req.method(),
                    path = %req.uri().path(),
                    "Route matched"
                );
                route.call(req)
            }
            None => {
                tracing::debug!(
                    method = %req.method(),
                    path = %req.uri().path(),
                    "No route matched"
                );
                Box::pin(future::ready(Ok(response::not_found())))
            }
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
