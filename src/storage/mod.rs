// Storage module - appends submission audit events to JSON Lines files
//
// JSON Lines (JSONL) writes one JSON object per line, so the audit trail can
// be tailed, grepped, or fed to jq without loading the whole file.
//
// Each server run gets its own file: landify-leads-YYYYMMDD-HHMMSS-XXXX.jsonl
// Example: jq 'select(.type == "failed")' logs/landify-leads-20251127-143022-a7b3.jsonl

use crate::events::LeadEvent;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Writes audit events to a JSON Lines file
pub struct AuditLog {
    log_dir: PathBuf,
    run_id: String,
    event_rx: mpsc::Receiver<LeadEvent>,
}

impl AuditLog {
    /// Create the writer, making sure the directory exists
    pub fn new(
        log_dir: PathBuf,
        run_id: String,
        event_rx: mpsc::Receiver<LeadEvent>,
    ) -> Result<Self> {
        fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create audit directory {}", log_dir.display()))?;

        Ok(Self {
            log_dir,
            run_id,
            event_rx,
        })
    }

    /// Path of this run's audit file
    pub fn file_path(&self) -> PathBuf {
        self.log_dir.join(format!("landify-leads-{}.jsonl", self.run_id))
    }

    /// Write events until every sender is dropped
    pub async fn run(mut self) -> Result<()> {
        tracing::info!("Audit log started: {:?}", self.file_path());

        while let Some(event) = self.event_rx.recv().await {
            if let Err(e) = self.write_event(&event) {
                tracing::error!("Failed to write audit event: {:?}", e);
                // Keep going; one bad write shouldn't stop the trail
            }
        }

        tracing::info!("Audit log shutting down");
        Ok(())
    }

    fn write_event(&self, event: &LeadEvent) -> Result<()> {
        let path = self.file_path();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .context("Failed to open audit file")?;

        let json = serde_json::to_string(event).context("Failed to serialize audit event")?;
        writeln!(file, "{}", json).context("Failed to write audit file")?;

        // Flush per line so the trail survives a crash
        file.flush().context("Failed to flush audit file")?;

        Ok(())
    }
}
