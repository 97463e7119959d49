//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → routing::SharedRouter (resolve + handler)
//!     → passthrough.rs (optional forward to the upstream origin)
//!     → response.rs (not-found and helper responses)
//!     → Send to client
//! ```

pub mod passthrough;
pub mod request;
pub mod response;
pub mod server;

pub use passthrough::Passthrough;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
