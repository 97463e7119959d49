//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing, http, lifecycle
//!     → tracing macros (structured fields, request ID)
//!     → logging.rs subscriber (EnvFilter + fmt layer)
//!     → stdout
//! ```

pub mod logging;
