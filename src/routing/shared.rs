//! Route table shared between serving tasks and live registration.
//!
//! Readers load an immutable `Router` snapshot without locking. Writers are
//! serialized, copy the current table, apply their changes and publish the
//! result with a single atomic swap, so a request never iterates a table that
//! is being modified.

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use axum::body::Body;
use axum::http::Request;

use crate::routing::handler::HandlerFuture;
use crate::routing::router::Router;

pub struct SharedRouter {
    current: ArcSwap<Router>,
    writer: Mutex<()>,
}

impl SharedRouter {
    pub fn new(router: Router) -> Self {
        Self {
            current: ArcSwap::from_pointee(router),
            writer: Mutex::new(()),
        }
    }

    /// The table currently used for resolution.
    pub fn snapshot(&self) -> Arc<Router> {
        self.current.load_full()
    }

    /// Apply `f` to a copy of the table and publish it if `f` succeeds.
    ///
    /// Routes added by `f` land after every route already published.
    pub fn update<F, E>(&self, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut Router) -> Result<(), E>,
    {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = Router::clone(&self.current.load_full());
        f(&mut next)?;

        tracing::debug!(routes = next.len(), "Route table updated");
        self.current.store(Arc::new(next));
        Ok(())
    }

    /// Dispatch against the current snapshot.
    pub fn route(&self, req: Request<Body>) -> HandlerFuture {
        self.current.load().route(req)
    }

    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }
}

impl From<Router> for SharedRouter {
    fn from(router: Router) -> Self {
        Self::new(router)
    }
}

impl Default for SharedRouter {
    fn default() -> Self {
        Self::new(Router::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response;
    use crate::routing::handler::BoxError;
    use crate::routing::RouterError;
    use axum::http::StatusCode;

    async fn hello(_req: Request<Body>) -> Result<axum::response::Response, BoxError> {
        Ok(response::text("hello"))
    }

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::default()).unwrap()
    }

    #[tokio::test]
    async fn test_update_publishes_new_routes() {
        let shared = SharedRouter::default();
        let response = shared.route(request("/hello")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        shared
            .update(|router| router.get("/hello", hello).map(|_| ()))
            .unwrap();

        let response = shared.route(request("/hello")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn test_snapshot_unchanged_by_update() {
        let mut router = Router::new();
        router.all("/", hello).unwrap();
        let shared = SharedRouter::from(router);

        let before = shared.snapshot();
        shared
            .update(|router| router.all("/other", hello).map(|_| ()))
            .unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(shared.snapshot().len(), 2);
    }

    #[test]
    fn test_failed_update_is_discarded() {
        let shared = SharedRouter::default();
        let result = shared.update(|router| {
            router.all("/ok", hello)?;
            router.all("/broken(", hello)?;
            Ok::<_, RouterError>(())
        });

        assert!(result.is_err());
        assert!(shared.is_empty());
    }
}
