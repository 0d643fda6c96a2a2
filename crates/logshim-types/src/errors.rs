//! Error types for logshim operations.

use thiserror::Error;

/// The main error type for logshim operations.
///
/// Logging is a side channel, so most of these never reach application code:
/// the facade and the console adapter absorb them. They surface from
/// configuration loading, subscriber installation and custom emitters.
#[derive(Error, Debug)]
pub enum LogshimError {
    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),

    /// An emitter refused or failed to accept a record
    #[error("Emit error: {0}")]
    Emit(String),

    /// Console adapter error
    #[error("Console error: {0}")]
    Console(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for logshim operations.
pub type Result<T> = std::result::Result<T, LogshimError>;
