//! Lead store configuration
//!
//! `rest` talks to the hosted database; `memory` keeps leads in-process
//! (demo mode, local development).

use serde::Deserialize;

/// Which `LeadStore` implementation to build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Hosted store over its REST insert endpoint (default)
    #[default]
    Rest,
    /// In-process store, lost on exit
    Memory,
}

impl StoreBackend {
    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Memory => "memory",
        }
    }
}

/// Lead store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Project base URL, e.g. https://abc.supabase.co
    pub url: String,
    /// Project key sent as `apikey` and bearer token
    pub api_key: String,
    /// Table that receives leads
    pub table: String,
    /// Request timeout in seconds (0 = no client-side timeout)
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Rest,
            url: String::new(),
            api_key: String::new(),
            table: "leads".to_string(),
            timeout_secs: 0,
        }
    }
}

/// Store settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileStore {
    pub backend: Option<StoreBackend>,
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub table: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl StoreConfig {
    /// Create from file config with defaults; env values win over the file
    pub fn from_file(
        file: Option<FileStore>,
        url_override: Option<String>,
        key_override: Option<String>,
    ) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            backend: file.backend.unwrap_or(defaults.backend),
            url: url_override.or(file.url).unwrap_or(defaults.url),
            api_key: key_override.or(file.api_key).unwrap_or(defaults.api_key),
            table: file.table.unwrap_or(defaults.table),
            timeout_secs: file.timeout_secs.unwrap_or(defaults.timeout_secs),
        }
    }
}
