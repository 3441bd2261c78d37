//! Feature flags configuration
//!
//! Feature flags for optional modules (opt-out: default enabled).

use serde::Deserialize;

/// Feature flags for optional modules (opt-out: default enabled)
#[derive(Debug, Clone)]
pub struct Features {
    /// Audit log: append submission outcomes to JSONL files
    pub audit_log: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self { audit_log: true }
    }
}

/// Feature flags as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileFeatures {
    pub audit_log: Option<bool>,
}

impl Features {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileFeatures>) -> Self {
        let file = file.unwrap_or_default();

        Self {
            audit_log: file.audit_log.unwrap_or(true),
        }
    }
}
