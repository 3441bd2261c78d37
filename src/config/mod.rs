//! Configuration for the landing page server
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/landify/config.toml, or $LANDIFY_CONFIG)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod features;
mod observability;
mod serialization;
mod site;
mod store;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use features::{Features, FileFeatures};
pub use observability::{FileLogging, LogRotation, LoggingConfig};
pub use site::{FileSite, SiteConfig};
pub use store::{FileStore, StoreBackend, StoreConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DEFAULT_AUDIT_DIR: &str = "./logs";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server to
    pub bind_addr: SocketAddr,

    /// Demo mode: keep leads in memory regardless of the store backend
    pub demo_mode: bool,

    /// Directory for the JSONL submission audit files
    pub audit_dir: PathBuf,

    /// Landing page copy
    pub site: SiteConfig,

    /// Where leads are written
    pub store: StoreConfig,

    /// Feature flags for optional modules
    pub features: Features,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            demo_mode: false,
            audit_dir: PathBuf::from(DEFAULT_AUDIT_DIR),
            site: SiteConfig::default(),
            store: StoreConfig::default(),
            features: Features::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub bind_addr: Option<String>,
    pub demo_mode: Option<bool>,
    pub audit_dir: Option<String>,

    /// Optional [site] section
    pub site: Option<FileSite>,

    /// Optional [store] section
    pub store: Option<FileStore>,

    /// Optional [features] section
    pub features: Option<FileFeatures>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: $LANDIFY_CONFIG or ~/.config/landify/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("LANDIFY_CONFIG") {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|p| p.join(".config").join("landify").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help operators discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// A missing file means defaults. A file that exists but cannot be read
    /// or parsed is an error: a broken config should fail fast rather than
    /// silently fall back to defaults.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_file_config(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read config file {}", path.display())),
        }
    }

    pub(crate) fn parse_file_config(contents: &str) -> Result<FileConfig> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Result<Self> {
        let file = Self::load_file_config()?;
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_sources(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        // Bind address: env > file > default
        let bind = env("LANDIFY_BIND")
            .or(file.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr: SocketAddr = bind
            .parse()
            .with_context(|| format!("Invalid bind address: {}", bind))?;

        // Demo mode: env > file > default
        let demo_mode = env("LANDIFY_DEMO")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .or(file.demo_mode)
            .unwrap_or(false);

        // Audit directory: env > file > default
        let audit_dir = env("LANDIFY_AUDIT_DIR")
            .or(file.audit_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_AUDIT_DIR));

        let site = SiteConfig::from_file(file.site);
        let features = Features::from_file(file.features);
        let logging = LoggingConfig::from_file(file.logging);

        // Store credentials usually come from the environment
        let store = StoreConfig::from_file(
            file.store,
            env("LANDIFY_STORE_URL"),
            env("LANDIFY_STORE_KEY"),
        );

        Ok(Self {
            bind_addr,
            demo_mode,
            audit_dir,
            site,
            store,
            features,
            logging,
        })
    }

    /// Backend actually used at runtime (demo mode forces memory)
    pub fn effective_backend(&self) -> StoreBackend {
        if self.demo_mode {
            StoreBackend::Memory
        } else {
            self.store.backend
        }
    }
}
