//! Engine error types

use thiserror::Error;

/// Errors that can occur while constructing a search engine.
///
/// Searching itself never fails: every problem during a search degrades to
/// fewer matches instead of an error.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// Configuration values are out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The matcher thread pool could not be created
    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),
}

/// Result type for engine construction
pub type Result<T> = std::result::Result<T, EngineError>;
