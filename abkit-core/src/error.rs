//! Error types for abkit-core.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the core domain.
///
/// All errors propagate immediately to the caller; nothing is retried or
/// suppressed. A failed list construction leaves the experiment's created
/// flag untouched, so retrying is always safe.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or out-of-range parameter.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation invoked while its state preconditions are violated.
    #[error("state conflict: {0}")]
    StateConflict(String),

    /// Operation invoked before the required state exists.
    #[error("not ready: {0}")]
    NotReady(String),
}
