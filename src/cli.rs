// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - serve (default): run the landing page server
// - submit: send one lead through the submission handler and exit
// - config --show | --path | --reset: configuration management

use crate::config::{Config, VERSION};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;

/// Landify - landing page and lead capture server
#[derive(Parser)]
#[command(name = "landify")]
#[command(version = VERSION)]
#[command(about = "Landing page and lead capture server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Submit a single lead to the configured store
    Submit(SubmitArgs),

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Skip the overwrite confirmation for --reset
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Form fields for `landify submit`
#[derive(Args, Debug, Default)]
pub struct SubmitArgs {
    /// Contact email (required)
    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub company: String,

    #[arg(long, default_value = "")]
    pub message: String,
}

impl From<SubmitArgs> for crate::leads::LeadFields {
    fn from(args: SubmitArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            company: args.company,
            message: args.message,
        }
    }
}

/// Run a `config` subcommand
pub fn handle_config(show: bool, path: bool, reset: bool, yes: bool) -> Result<()> {
    if path {
        handle_config_path()
    } else if show {
        handle_config_show()
    } else if reset {
        handle_config_reset(yes)
    } else {
        println!("Usage: landify config [--show|--path|--reset [--yes]]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --path    Show config file path");
        println!("  --reset   Reset config file to defaults");
        Ok(())
    }
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::from_env()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("bind_addr = {:?}", config.bind_addr.to_string());
    println!("demo_mode = {}", config.demo_mode);
    println!("audit_dir = {:?}", config.audit_dir.display().to_string());
    println!();
    println!("[site]");
    println!("name = {:?}", config.site.name);
    println!();
    println!("[store]");
    println!("backend = {:?}", config.effective_backend().as_str());
    println!("url = {:?}", config.store.url);
    println!(
        "api_key = {}",
        if config.store.api_key.is_empty() {
            "(unset)"
        } else {
            "(set)"
        }
    );
    println!("table = {:?}", config.store.table);
    println!("timeout_secs = {}", config.store.timeout_secs);
    println!();
    println!("[features]");
    println!("audit_log = {}", config.features.audit_log);
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!("file_rotation = {:?}", config.logging.file_rotation.as_str());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(())
}

fn handle_config_reset(yes: bool) -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    if path.exists() && !yes {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let written = Config::default()
        .save()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Config reset to defaults: {}", written.display());
    Ok(())
}
