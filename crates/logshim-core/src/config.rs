//! Configuration loading for logshim.
//!
//! Settings are resolved in two layers:
//! 1. Defaults for the environment named by `NODE_ENV`
//! 2. An optional YAML file overriding individual settings
//!
//! ## Example
//!
//! ```yaml
//! # logshim.yml
//! level: warn
//! color: false
//! ```
//!
//! ```no_run
//! let _config = logshim_core::config::load(Some(std::path::Path::new("logshim.yml")))?;
//! # Ok::<(), logshim_types::LogshimError>(())
//! ```

use logshim_types::{LogFormat, LogLevel, LoggingConfig, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Optional per-setting overrides, as read from a YAML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingOverrides {
    /// Minimum level
    pub level: Option<LogLevel>,
    /// Output format
    pub format: Option<LogFormat>,
    /// Colorize pretty output
    pub color: Option<bool>,
    /// strftime pattern for pretty timestamps
    pub time_format: Option<String>,
}

impl LoggingOverrides {
    /// Parse overrides from YAML. An empty document overrides nothing.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply these overrides on top of `config`.
    pub fn apply(self, mut config: LoggingConfig) -> LoggingConfig {
        if let Some(level) = self.level {
            config.level = level;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(color) = self.color {
            config.color = color;
        }
        if let Some(time_format) = self.time_format {
            config.time_format = time_format;
        }
        config
    }
}

/// Resolve configuration from `NODE_ENV` and an optional override file.
pub fn load(path: Option<&Path>) -> Result<LoggingConfig> {
    load_over(LoggingConfig::from_env(), path)
}

/// Apply the override file at `path`, if any, to `base`.
///
/// A path that does not exist leaves `base` unchanged.
pub fn load_over(base: LoggingConfig, path: Option<&Path>) -> Result<LoggingConfig> {
    let Some(path) = path else {
        return Ok(base);
    };
    if !path.exists() {
        return Ok(base);
    }

    let content = fs::read_to_string(path)?;

    Ok(LoggingOverrides::from_yaml(&content)?.apply(base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use logshim_types::{LogshimError, RuntimeEnv};
    use tempfile::TempDir;

    #[test]
    fn test_overrides_layer_on_environment_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logshim.yml");
        fs::write(&path, "level: warn\ncolor: false\n").unwrap();

        let base = LoggingConfig::for_environment(RuntimeEnv::Development);
        let config = load_over(base, Some(&path)).unwrap();

        assert_eq!(config.level, LogLevel::Warn);
        assert!(!config.color);
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let base = LoggingConfig::for_environment(RuntimeEnv::Production);
        let config = load_over(base.clone(), Some(&temp_dir.path().join("absent.yml"))).unwrap();
        assert_eq!(config, base);
    }

    #[test]
    fn test_empty_file_overrides_nothing() {
        assert_eq!(LoggingOverrides::from_yaml("  \n").unwrap(), LoggingOverrides::default());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = LoggingOverrides::from_yaml("colour: true").unwrap_err();
        assert!(matches!(err, LogshimError::Yaml(_)));
    }

    #[test]
    fn test_invalid_level_is_a_yaml_error() {
        let err = LoggingOverrides::from_yaml("level: loud").unwrap_err();
        assert!(matches!(err, LogshimError::Yaml(_)));
        assert!(err.to_string().starts_with("YAML parsing error"));
    }

    #[test]
    fn test_unreadable_file_is_an_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_over(LoggingConfig::default(), Some(temp_dir.path())).unwrap_err();
        assert!(matches!(err, LogshimError::Io(_)));
    }

    #[test]
    fn test_format_override() {
        let overrides = LoggingOverrides::from_yaml("format: json\nlevel: error").unwrap();
        let config = overrides.apply(LoggingConfig::default());
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, LogLevel::Error);
    }
}
