//! Lead model and normalization
//!
//! A lead is the contact request captured by the landing page form. Raw form
//! input arrives as `LeadFields` (four strings, possibly blank) and is turned
//! into a `Lead` by `LeadFields::normalize`, which is the only way to build
//! one outside of tests. A `Lead` therefore always carries a non-empty email.

pub mod memory;
pub mod rest;
pub mod store;

use serde::{Deserialize, Serialize};

pub use memory::MemoryLeadStore;
pub use rest::RestLeadStore;
pub use store::{LeadStore, StoreError};

// ─────────────────────────────────────────────────────────────────────────────
// Raw Input
// ─────────────────────────────────────────────────────────────────────────────

/// Form field values as submitted, before any trimming
///
/// Every field defaults to an empty string so a request that omits a field
/// deserializes the same way as one that sends it blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LeadFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub message: String,
}

impl LeadFields {
    /// Trim every field and null out the empty optional ones
    ///
    /// Fails with `SubmitError::Validation` when the email is blank.
    pub fn normalize(&self) -> Result<Lead, SubmitError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(SubmitError::Validation);
        }

        Ok(Lead {
            name: non_empty(&self.name),
            email: email.to_string(),
            company: non_empty(&self.company),
            message: non_empty(&self.message),
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Normalized Lead
// ─────────────────────────────────────────────────────────────────────────────

/// A validated lead, ready for the store
///
/// Serializes absent fields as explicit `null` so the remote row gets NULL
/// rather than an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: Option<String>,
    pub email: String,
    pub company: Option<String>,
    pub message: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Submission Errors
// ─────────────────────────────────────────────────────────────────────────────

/// The two ways a submission can fail
///
/// `Display` is the user-facing banner text. The store's own error never
/// reaches this type; it is logged where the failure happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// Email missing after trimming; no store call was made
    #[error("Please enter a valid email.")]
    Validation,
    /// The store rejected or failed the insert
    #[error("Something went wrong. Please try again.")]
    Persistence,
}

impl SubmitError {
    /// Short machine-readable kind, used in logs and the JSON API
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Persistence => "persistence",
        }
    }
}
