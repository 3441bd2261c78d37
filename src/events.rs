// Events that flow from lead submissions to the audit log
//
// One event per submission outcome. Emails are carried only as fingerprints
// so the audit file never holds contact details; the store is the system of
// record for those.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::leads::Lead;
use crate::util::email_fingerprint;

/// Audit event for a single submission attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")] // {"type": "submitted", ...}
pub enum LeadEvent {
    /// The store accepted the lead
    Submitted {
        timestamp: DateTime<Utc>,
        email_hash: String,
        has_name: bool,
        has_company: bool,
        has_message: bool,
        store: String,
    },

    /// Validation failed before any store call
    Rejected {
        timestamp: DateTime<Utc>,
        reason: String,
    },

    /// The store failed the insert
    Failed {
        timestamp: DateTime<Utc>,
        email_hash: String,
        store: String,
        error: String,
    },

    /// The caller dropped the submission while the store call was in flight
    Abandoned {
        timestamp: DateTime<Utc>,
        email_hash: String,
        store: String,
    },
}

impl LeadEvent {
    pub fn submitted(lead: &Lead, store: &str) -> Self {
        Self::Submitted {
            timestamp: Utc::now(),
            email_hash: email_fingerprint(&lead.email),
            has_name: lead.name.is_some(),
            has_company: lead.company.is_some(),
            has_message: lead.message.is_some(),
            store: store.to_string(),
        }
    }

    pub fn rejected(reason: &str) -> Self {
        Self::Rejected {
            timestamp: Utc::now(),
            reason: reason.to_string(),
        }
    }

    pub fn failed(lead: &Lead, store: &str, error: &str) -> Self {
        Self::Failed {
            timestamp: Utc::now(),
            email_hash: email_fingerprint(&lead.email),
            store: store.to_string(),
            error: error.to_string(),
        }
    }

    pub fn abandoned(email_hash: &str, store: &str) -> Self {
        Self::Abandoned {
            timestamp: Utc::now(),
            email_hash: email_hash.to_string(),
            store: store.to_string(),
        }
    }
}

/// Sending half of the audit channel
///
/// Never blocks: a full or closed channel drops the event with a debug log.
#[derive(Clone)]
pub struct EventSink {
    tx: mpsc::Sender<LeadEvent>,
}

impl EventSink {
    pub fn new(tx: mpsc::Sender<LeadEvent>) -> Self {
        Self { tx }
    }

    pub fn emit(&self, event: LeadEvent) {
        if let Err(e) = self.tx.try_send(event) {
            tracing::debug!("Audit event dropped: {}", e);
        }
    }
}
