//! Configuration for backup runs
//!
//! There is no configuration file. Values come from, in order of precedence:
//! 1. Command-line arguments
//! 2. Environment variables (`FIRESTORE_PROJECT_ID`, `RUST_LOG`)
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{BackupError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Connection configuration
    pub connection: ConnectionConfig,

    /// Export configuration
    pub export: ExportConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Connection-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Project id override; the credential's `project_id` is used when unset
    #[serde(default)]
    pub project_id: Option<String>,

    /// Firestore database id
    #[serde(default = "default_database_id")]
    pub database_id: String,

    /// Documents requested per remote page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

/// Export and output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the `<collection>.json` files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Spaces per indentation level in the output files
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Show a progress spinner while reading collections
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,

    /// Enable ANSI colors in logs
    #[serde(default = "default_log_color")]
    pub color: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_database_id() -> String {
    "(default)".to_string()
}

fn default_page_size() -> usize {
    300
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_indent() -> usize {
    1
}

fn default_show_progress() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    false
}

fn default_log_color() -> bool {
    true
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            database_id: default_database_id(),
            page_size: default_page_size(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            indent: default_indent(),
            show_progress: default_show_progress(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
            color: default_log_color(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    ///
    /// Runs before any network activity so that bad arguments surface as
    /// usage errors.
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, usage error otherwise
    pub fn validate(&self) -> Result<()> {
        if self.connection.page_size == 0 {
            return Err(BackupError::Usage(
                "page size must be greater than zero".to_string(),
            ));
        }

        if self.connection.database_id.trim().is_empty() {
            return Err(BackupError::Usage("database id must not be empty".to_string()));
        }

        if let Some(project) = &self.connection.project_id {
            if project.trim().is_empty() {
                return Err(BackupError::Usage("project id must not be empty".to_string()));
            }
        }

        if !self.export.output_dir.is_dir() {
            return Err(BackupError::Usage(format!(
                "output directory does not exist: {}",
                self.export.output_dir.display()
            )));
        }

        Ok(())
    }
}

impl LogLevel {
    /// Directive string for `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.connection.database_id, "(default)");
        assert_eq!(config.connection.page_size, 300);
        assert_eq!(config.export.output_dir, PathBuf::from("."));
        assert_eq!(config.export.indent, 1);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::new().validate().is_ok());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut config = Config::default();
        config.connection.page_size = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_output_dir_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.export.output_dir = dir.path().join("missing");
        assert!(matches!(config.validate(), Err(BackupError::Usage(_))));
    }

    #[test]
    fn test_blank_project_override_rejected() {
        let mut config = Config::default();
        config.connection.project_id = Some("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Debug.as_filter(), "debug");
        assert_eq!(LogLevel::Trace.as_filter(), "trace");
    }
}
