//! Observability configuration: log level, file output, rotation

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{self, RollingFileAppender};

/// Log file rotation strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    /// Single file, never rotated
    Never,
}

impl LogRotation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }

    /// Build the matching `tracing-appender` writer
    pub fn appender(&self, dir: &Path, prefix: &str) -> RollingFileAppender {
        match self {
            Self::Hourly => rolling::hourly(dir, prefix),
            Self::Daily => rolling::daily(dir, prefix),
            Self::Never => rolling::never(dir, prefix),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error (RUST_LOG wins when set)
    pub level: String,
    /// Also write JSON logs to rolling files
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File name prefix ("landify" -> "landify.2024-01-15")
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs/trace"),
            file_rotation: LogRotation::Daily,
            file_prefix: "landify".to_string(),
        }
    }
}

/// Logging settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<LogRotation>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            level: file.level.unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_rotation: file.file_rotation.unwrap_or(defaults.file_rotation),
            file_prefix: file.file_prefix.unwrap_or(defaults.file_prefix),
        }
    }

    /// Default `EnvFilter` directive when RUST_LOG is unset
    pub fn filter_directive(&self) -> String {
        format!("landify={level},axum=info", level = self.level)
    }
}
