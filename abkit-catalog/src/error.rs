//! Error types for the catalog.

use abkit_core::ExperimentId;
use thiserror::Error;

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Requested experiment identifier does not exist.
    #[error("experiment not found: {0}")]
    NotFound(ExperimentId),

    /// Identifier collision at registration.
    #[error("experiment already exists: {0}")]
    AlreadyExists(ExperimentId),

    /// An input table is missing required columns or holds bad values.
    #[error("invalid table: {0}")]
    InvalidTable(String),

    /// Filesystem error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error bubbled up from the core domain.
    #[error(transparent)]
    Core(#[from] abkit_core::Error),
}
