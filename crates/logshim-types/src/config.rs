//! Configuration types and structures.

use serde::{Deserialize, Serialize};
use crate::LogLevel;

/// Environment variable selecting the runtime environment.
pub const ENV_VAR: &str = "NODE_ENV";

/// Runtime environment, as named by `NODE_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnv {
    /// `NODE_ENV=production`
    Production,
    /// Anything else, including unset
    Development,
}

impl RuntimeEnv {
    /// Classify a raw `NODE_ENV` value. Only the exact string `production` counts.
    pub fn from_node_env(value: Option<&str>) -> Self {
        match value {
            Some("production") => RuntimeEnv::Production,
            _ => RuntimeEnv::Development,
        }
    }

    /// Read `NODE_ENV` from the process environment.
    pub fn detect() -> Self {
        Self::from_node_env(std::env::var(ENV_VAR).ok().as_deref())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format with colors
    Pretty,
    /// One JSON object per line for machine parsing
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Environment the settings were derived from
    pub environment: RuntimeEnv,
    /// Output format
    pub format: LogFormat,
    /// Minimum level emitted
    pub level: LogLevel,
    /// Whether to colorize pretty output
    #[serde(default)]
    pub color: bool,
    /// strftime pattern for pretty timestamps
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

fn default_time_format() -> String {
    "%H:%M:%S %z".to_string()
}

impl LoggingConfig {
    /// Defaults for an environment.
    pub fn for_environment(environment: RuntimeEnv) -> Self {
        match environment {
            RuntimeEnv::Production => Self {
                environment,
                format: LogFormat::Json,
                level: LogLevel::Info,
                color: false,
                time_format: default_time_format(),
            },
            RuntimeEnv::Development => Self {
                environment,
                format: LogFormat::Pretty,
                level: LogLevel::Debug,
                color: true,
                time_format: default_time_format(),
            },
        }
    }

    /// Defaults for the environment named by `NODE_ENV`.
    pub fn from_env() -> Self {
        Self::for_environment(RuntimeEnv::detect())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(RuntimeEnv::Development)
    }
}
