//! Config serialization to TOML
//!
//! Single source of truth for the config file format: the first-run template
//! and `landify config --reset` both come from `to_toml()`.

use super::Config;

/// Quote a string as a TOML basic string
fn quoted(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

impl Config {
    /// Render this configuration as a commented TOML document
    ///
    /// The store key is never written; it belongs in `LANDIFY_STORE_KEY`.
    pub fn to_toml(&self) -> String {
        format!(
            r#"# landify configuration

# HTTP bind address (LANDIFY_BIND overrides)
bind_addr = {bind}

# Keep leads in memory instead of the hosted store (LANDIFY_DEMO overrides)
demo_mode = {demo}

# Directory for JSONL submission audit files (LANDIFY_AUDIT_DIR overrides)
audit_dir = {audit_dir}

# Landing page copy
[site]
name = {site_name}
tagline = {site_tagline}
headline = {site_headline}
summary = {site_summary}

# Lead store
# backend: "rest" (hosted database REST endpoint) or "memory"
[store]
backend = "{backend}"
url = {store_url}  # LANDIFY_STORE_URL overrides
# api_key = ""  # prefer LANDIFY_STORE_KEY
table = {store_table}
timeout_secs = {store_timeout}  # 0 = no client-side timeout

# Feature flags
[features]
audit_log = {audit_log}

# Logging configuration (RUST_LOG env var overrides level)
[logging]
level = {log_level}
# File logging (in addition to stdout)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            bind = quoted(&self.bind_addr.to_string()),
            demo = self.demo_mode,
            audit_dir = quoted(&self.audit_dir.display().to_string()),
            site_name = quoted(&self.site.name),
            site_tagline = quoted(&self.site.tagline),
            site_headline = quoted(&self.site.headline),
            site_summary = quoted(&self.site.summary),
            backend = self.store.backend.as_str(),
            store_url = quoted(&self.store.url),
            store_table = quoted(&self.store.table),
            store_timeout = self.store.timeout_secs,
            audit_log = self.features.audit_log,
            log_level = quoted(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = quoted(&self.logging.file_prefix),
        )
    }

    /// Write this configuration to the config path, replacing any file
    pub fn save(&self) -> Result<std::path::PathBuf, std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())?;
        Ok(path)
    }
}
