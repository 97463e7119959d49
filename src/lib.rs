//! Edge-function request router.
//!
//! Routes pair a list of predicates with an async handler; the first route
//! whose predicates all accept a request handles it.
//!
//! ```ignore
//! use edge_router::Router;
//!
//! let mut router = Router::new();
//! router.get(".*/foo", foo)?.all("/", index)?;
//! let response = router.route(request).await?;
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod worker;

pub use config::EdgeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{predicate, BoxError, Handler, HandlerFuture, Predicate, Route, Router, RouterError, SharedRouter};
