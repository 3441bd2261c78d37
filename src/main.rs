// Landify - landing page and lead capture server
//
// Serves a marketing landing page whose only moving part is a contact form.
// A submitted form becomes one row in a hosted `leads` table.
//
// Architecture:
// - Web (axum): landing page, form post and JSON submission routes
// - Submission: LeadForm validates, normalizes, and tracks idle/submitting/done
// - Leads: LeadStore trait with REST (hosted database) and in-memory backends
// - Storage: optional JSONL audit trail fed by an mpsc channel

mod cli;
mod config;
mod events;
mod leads;
mod logging;
mod startup;
mod storage;
mod submission;
mod util;
mod web;

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands, SubmitArgs};
use config::{Config, StoreBackend};
use events::EventSink;
use leads::{LeadStore, MemoryLeadStore, RestLeadStore};
use storage::AuditLog;
use submission::{LeadForm, SUCCESS_MESSAGE};
use tokio::sync::{mpsc, oneshot};

/// Audit events buffered before new ones are dropped
const AUDIT_CHANNEL_SIZE: usize = 1000;

/// Generate a unique ID for this run's audit file
/// Format: YYYYMMDD-HHMMSS-XXXX (timestamp + 4 random hex chars)
fn generate_run_id() -> String {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let timestamp = Utc::now().format("%Y%m%d-%H%M%S");
    let random = RandomState::new().build_hasher().finish();
    format!("{}-{:04x}", timestamp, random & 0xFFFF)
}

/// Build the configured store
///
/// The memory handle is returned separately so the server can summarize what
/// it held on shutdown.
fn build_store(config: &Config) -> Result<(Arc<dyn LeadStore>, Option<MemoryLeadStore>)> {
    match config.effective_backend() {
        StoreBackend::Rest => {
            let store = RestLeadStore::from_config(&config.store)?;
            Ok((Arc::new(store), None))
        }
        StoreBackend::Memory => {
            let store = MemoryLeadStore::new();
            Ok((Arc::new(store.clone()), Some(store)))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config {
            show,
            path,
            reset,
            yes,
        }) => cli::handle_config(show, path, reset, yes),
        Some(Commands::Submit(args)) => run_submit(args).await,
        Some(Commands::Serve) | None => serve().await,
    }
}

/// `landify submit`: one pass through the submission handler
async fn run_submit(args: SubmitArgs) -> Result<()> {
    let config = Config::from_env()?;
    let _log_guard = logging::init(&config.logging);

    let (store, _) = build_store(&config)?;
    let form = LeadForm::with_fields(store, args.into());
    form.submit().await?;

    println!("{}", SUCCESS_MESSAGE);
    Ok(())
}

/// Run the HTTP server until Ctrl-C
async fn serve() -> Result<()> {
    // Ensure config template exists (helps operators discover options)
    Config::ensure_config_exists();

    let config = Config::from_env()?;

    // The guard must outlive the server so buffered file logs are flushed
    let _log_guard = logging::init(&config.logging);

    startup::print_startup(&config);

    let run_id = generate_run_id();
    tracing::debug!("Run ID: {}", run_id);

    let (store, memory) = build_store(&config)?;
    tracing::info!(store = store.name(), "Lead store ready");

    // Audit trail (if enabled): bounded channel, writer in its own task
    let (events, audit_handle) = if config.features.audit_log {
        let (tx, rx) = mpsc::channel(AUDIT_CHANNEL_SIZE);
        let audit = AuditLog::new(config.audit_dir.clone(), run_id, rx)?;
        (Some(EventSink::new(tx)), Some(tokio::spawn(audit.run())))
    } else {
        (None, None)
    };

    let state = web::AppState::new(store, events, config.site.clone());

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let mut server = tokio::spawn(web::start_server(config.bind_addr, state, shutdown_rx));

    // Either the server stops on its own (bind failure) or we get Ctrl-C
    let finished = tokio::select! {
        result = &mut server => Some(result),
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                tracing::warn!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutdown signal received");
            None
        }
    };

    let served = match finished {
        Some(result) => result,
        None => {
            let _ = shutdown_tx.send(());
            server.await
        }
    }
    .context("Server task panicked")?;

    // The server owned the last event sender, so the audit writer drains and exits
    if let Some(handle) = audit_handle {
        match handle.await {
            Ok(Err(e)) => tracing::error!("Audit log error: {:?}", e),
            Err(e) => tracing::error!("Audit task panicked: {:?}", e),
            Ok(Ok(())) => {}
        }
    }

    if let Some(memory) = memory {
        let leads = memory.leads();
        tracing::info!("Demo store held {} lead(s); they are not persisted", leads.len());
        for stored in leads {
            tracing::debug!(
                id = stored.id,
                created_at = %stored.created_at,
                email_hash = %util::email_fingerprint(&stored.lead.email),
                "Demo lead"
            );
        }
    }

    served
}
