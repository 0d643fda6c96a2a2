//! # logshim types
//!
//! Core types, traits, and enums shared across all logshim crates.
//!
//! This crate provides:
//!
//! - Log and console severities ([`LogLevel`], [`ConsoleLevel`])
//! - Records and metadata ([`LogRecord`], [`Metadata`])
//! - Error normalization ([`ErrorShape`], [`ErrorLike`], [`ErrorPayload`], [`Failure`])
//! - Logging configuration ([`LoggingConfig`])
//! - The emitter and console seams ([`Emitter`], [`ConsoleWriter`], [`ConsoleAdapter`])
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```
//! use logshim_types::{ConsoleLevel, ErrorLike, LogLevel};
//!
//! let level: ConsoleLevel = "log".parse().unwrap();
//! assert_eq!(level, ConsoleLevel::Log);
//!
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
//! assert_eq!(err.error_shape().message, "boom");
//! assert_eq!(LogLevel::Warn.to_string(), "warn");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod enums;
pub mod record;
pub mod error_shape;
pub mod traits;
pub mod config;

// Re-export common types for convenience
pub use errors::{LogshimError, Result};
pub use enums::{ConsoleLevel, LogLevel};
pub use record::{LogRecord, Metadata};
pub use error_shape::{ErrorLike, ErrorPayload, ErrorShape, Failure};
pub use traits::{ConsoleAdapter, ConsoleWriter, Emitter};
pub use config::{LogFormat, LoggingConfig, RuntimeEnv};

#[doc(hidden)]
pub use serde_json as __serde_json;
