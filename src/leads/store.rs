//! Persistence boundary for leads
//!
//! The submission flow only needs one operation: append a lead to the
//! `leads` collection. Authentication, connection setup and schema belong to
//! the store implementation.

use async_trait::async_trait;

use super::Lead;

/// Errors a store can report for an insert
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The request never produced a response (DNS, connect, timeout, ...)
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status
    ///
    /// Only the error `code` and `message` are kept. The rest of the body
    /// (`details`, `hint`) can echo the rejected row, email included.
    #[error("store rejected insert with status {status}{}", rejection_detail(.code, .message))]
    Rejected {
        status: u16,
        code: Option<String>,
        message: Option<String>,
    },
}

fn rejection_detail(code: &Option<String>, message: &Option<String>) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!(" ({}): {}", code, message),
        (Some(code), None) => format!(" ({})", code),
        (None, Some(message)) => format!(": {}", message),
        (None, None) => String::new(),
    }
}

/// Append-only lead sink
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Insert one lead. No retries, no deduplication.
    async fn insert_lead(&self, lead: &Lead) -> Result<(), StoreError>;

    /// Short name for logs and the startup banner
    fn name(&self) -> &'static str;
}
