//! Console-to-logger severity mapping.

use logshim_types::{ConsoleLevel, LogLevel, Result};

/// Map a console method onto the logger severity it is emitted at.
///
/// `log` becomes `info`; every other method keeps its name.
pub fn map_console_level(level: ConsoleLevel) -> LogLevel {
    match level {
        ConsoleLevel::Log | ConsoleLevel::Info => LogLevel::Info,
        ConsoleLevel::Warn => LogLevel::Warn,
        ConsoleLevel::Error => LogLevel::Error,
        ConsoleLevel::Debug => LogLevel::Debug,
    }
}

/// Map a console method by name. Unknown names are a configuration error.
pub fn console_level_for(method: &str) -> Result<LogLevel> {
    Ok(map_console_level(method.parse()?))
}

/// The `tracing` severity a logger level is emitted with.
pub fn tracing_level(level: LogLevel) -> tracing::Level {
    match level {
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Error => tracing::Level::ERROR,
    }
}

/// Inverse of [`tracing_level`]; `TRACE` folds into `debug`.
pub fn from_tracing_level(level: &tracing::Level) -> LogLevel {
    if *level == tracing::Level::ERROR {
        LogLevel::Error
    } else if *level == tracing::Level::WARN {
        LogLevel::Warn
    } else if *level == tracing::Level::INFO {
        LogLevel::Info
    } else {
        LogLevel::Debug
    }
}
