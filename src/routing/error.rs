//! Routing error definitions.

use thiserror::Error;

/// Errors raised while building a route table.
///
/// Resolution itself never fails: a request that matches nothing is answered
/// with the not-found response.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The path pattern is not a valid regular expression.
    #[error("invalid path pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for route registration.
pub type RouterResult<T> = Result<T, RouterError>;
