//! Common error types for TyTo components.

use thiserror::Error;

/// Common error type for TyTo operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key path does not exist in the JSON document
    #[error("key path '{key_path}' not found")]
    KeyPath { key_path: String },

    /// Value at the key path is not an array of strings
    #[error("value at '{key_path}' is not an array of strings")]
    NotStrings { key_path: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Engine construction error
    #[error(transparent)]
    Engine(#[from] tyto_core::EngineError),
}

/// Result type alias using TyTo Error.
pub type Result<T> = std::result::Result<T, Error>;
