//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (startup or live via SharedRouter):
//!     router.get(pattern, handler) / router.handle(predicates, handler)
//!     → predicate.rs (compile method/header/path predicates)
//!     → router.rs (append Route to the ordered table)
//!
//! Incoming Request (method, path, headers)
//!     → router.rs resolve (scan routes in registration order)
//!     → predicate.rs (evaluate every predicate of a route, AND)
//!     → first full match: handler.rs (call handler, return its future)
//!     → no match: fixed 404 "resource not found"
//! ```
//!
//! # Design Decisions
//! - First match wins; registration order is the only priority
//! - Path patterns compiled at registration, never per request
//! - Resolution is synchronous; the handler future is the only await point
//! - Handler errors pass through untouched

pub mod error;
pub mod handler;
pub mod predicate;
pub mod router;
pub mod shared;

pub use error::RouterError;
pub use handler::{BoxError, Handler, HandlerFuture};
pub use predicate::{HeaderEquals, MethodIs, PathMatches, Predicate, SharedPredicate};
pub use router::{Route, Router};
pub use shared::SharedRouter;
