//! Route handlers.

use std::future::Future;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use futures_util::future::BoxFuture;

pub use axum::BoxError;

/// Future returned by a handler.
pub type HandlerFuture = BoxFuture<'static, Result<Response, BoxError>>;

/// Asynchronously produces a response for a matched request.
///
/// Implemented for every `Fn(Request<Body>) -> impl Future<Output = Result<Response, BoxError>>`,
/// so `async fn` handlers register directly.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: Request<Body>) -> HandlerFuture;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, BoxError>> + Send + 'static,
{
    fn call(&self, req: Request<Body>) -> HandlerFuture {
        Box::pin(self(req))
    }
}
