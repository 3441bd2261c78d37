//! Landing page copy
//!
//! Brand name and hero text are configurable so the same binary can front a
//! renamed product without a rebuild.

use serde::Deserialize;

/// Text rendered on the landing page
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Brand name (page title, header, footer)
    pub name: String,
    /// Pill above the headline
    pub tagline: String,
    /// Hero headline
    pub headline: String,
    /// Hero paragraph
    pub summary: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Landify".to_string(),
            tagline: "Your AI Broker for Land Search & Acquisition".to_string(),
            headline: "Finding land deals faster, with data, not guesswork.".to_string(),
            summary: "Landify helps you identify off-market opportunities using public signals, \
                      smart enrichment, and AI-driven prioritization, so you spend time on the \
                      right parcels."
                .to_string(),
        }
    }
}

/// Site copy as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileSite {
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub headline: Option<String>,
    pub summary: Option<String>,
}

impl SiteConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileSite>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            name: file.name.unwrap_or(defaults.name),
            tagline: file.tagline.unwrap_or(defaults.tagline),
            headline: file.headline.unwrap_or(defaults.headline),
            summary: file.summary.unwrap_or(defaults.summary),
        }
    }
}
