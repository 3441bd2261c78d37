//! In-process lead store
//!
//! Backs demo mode (`LANDIFY_DEMO=1` or `store.backend = "memory"`) and the
//! tests. Leads live only as long as the process.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{Lead, LeadStore, StoreError};

/// A lead as recorded by the memory store
#[derive(Debug, Clone)]
pub struct StoredLead {
    pub id: u64,
    pub lead: Lead,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    leads: Vec<StoredLead>,
}

/// Cloneable handle to a shared in-memory `leads` table
#[derive(Debug, Clone, Default)]
pub struct MemoryLeadStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored lead, oldest first
    pub fn leads(&self) -> Vec<StoredLead> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .leads
            .clone()
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn insert_lead(&self, lead: &Lead) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.next_id += 1;
        let id = inner.next_id;
        inner.leads.push(StoredLead {
            id,
            lead: lead.clone(),
            created_at: Utc::now(),
        });
        tracing::debug!(id, "Lead stored in memory");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(email: &str) -> Lead {
        Lead {
            name: None,
            email: email.to_string(),
            company: None,
            message: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = MemoryLeadStore::new();
        store.insert_lead(&lead("a@b.com")).await.unwrap();
        store.insert_lead(&lead("c@d.com")).await.unwrap();

        let leads = store.leads();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].id, 1);
        assert_eq!(leads[1].id, 2);
        assert_eq!(leads[1].lead.email, "c@d.com");
    }

    #[tokio::test]
    async fn test_clones_share_the_table() {
        let store = MemoryLeadStore::new();
        let handle = store.clone();
        handle.insert_lead(&lead("a@b.com")).await.unwrap();
        assert_eq!(store.leads().len(), 1);
    }
}
