//! Error types for cache items
//!
//! Provides unified error handling using thiserror.

use std::convert::Infallible;

use thiserror::Error;

// == Cache Item Error Enum ==
/// Unified error type for cache item operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheItemError {
    /// An expiration setter received a value of an unsupported kind
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CacheItemError {
    /// Builds an `InvalidArgument` error naming what was expected and the kind received.
    pub fn unexpected_kind(expected: &str, received: &str) -> Self {
        CacheItemError::InvalidArgument(format!(
            "Value passed must be {}, \"{}\" passed instead",
            expected, received
        ))
    }
}

// Typed conversions into expiration inputs can never fail.
impl From<Infallible> for CacheItemError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache item operations.
pub type Result<T> = std::result::Result<T, CacheItemError>;
