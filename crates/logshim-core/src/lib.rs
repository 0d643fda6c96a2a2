//! # logshim core
//!
//! Structured logging and console interception layered over `tracing`.
//!
//! This crate provides:
//!
//! - **Sanitizer**: strips terminal escapes, collapses whitespace, truncates
//! - **Level mapping**: five console methods onto four logger severities
//! - **Logger**: `debug`/`info`/`warn`/`error` with consistent metadata and
//!   error shaping, plus `track_error` and `with_timing`
//! - **Console**: a console handle whose output can be routed into the logger,
//!   installed once and reversible
//! - **Output**: JSON lines in production, colorized lines in development
//! - **Request hook**: one info line per HTTP request, minus noisy paths
//!
//! ## Example
//!
//! ```rust
//! use logshim_core::{console, Logger, LoggingContext, MemoryEmitter, Console};
//! use logshim_types::meta;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemoryEmitter::new());
//! let ctx = LoggingContext::new(Logger::new(sink.clone()), Arc::new(Console::stdio()));
//!
//! ctx.logger().info("server started", Some(meta! { "port" => 3000 }));
//!
//! ctx.patch_console();
//! console!(ctx.console(), log, "\x1b[32mready\x1b[0m");
//!
//! assert_eq!(sink.records()[1].message, "ready");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod console;
pub mod context;
pub mod emit;
pub mod format;
pub mod level;
pub mod log;
pub mod logger;
pub mod request;
pub mod sanitize;
pub mod timing;

// Re-export commonly used items
pub use console::{Console, StdConsole};
pub use context::LoggingContext;
pub use emit::{MemoryEmitter, TracingEmitter};
pub use logger::Logger;
pub use logshim_types::{LogshimError, Result};
pub use sanitize::{sanitize, sanitize_str};

#[doc(hidden)]
pub use serde_json as __serde_json;

/// logshim version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
