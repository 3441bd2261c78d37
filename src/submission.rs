//! Lead submission handler
//!
//! `LeadForm` owns one form's field values and its lifecycle state:
//!
//! ```text
//! Idle ──submit──▶ Submitting ──▶ Success ─┐
//!                      ▲      └──▶ Error ──┤
//!                      └────── submit ─────┘
//! ```
//!
//! Only one submission runs at a time per form. The state lives behind a
//! `std::sync::Mutex` that is released before the store call, so a second
//! `submit` during the await sees `Submitting` and returns `Ignored`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::events::{EventSink, LeadEvent};
use crate::leads::{LeadFields, LeadStore, SubmitError};
use crate::util::email_fingerprint;

/// Success banner text
pub const SUCCESS_MESSAGE: &str = "Thanks! We'll be in touch soon.";

/// Lifecycle of a form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(SubmitError),
}

impl FormState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Banner to show under the form, if any
    pub fn banner(&self) -> Option<String> {
        match self {
            Self::Success => Some(SUCCESS_MESSAGE.to_string()),
            Self::Error(e) => Some(e.to_string()),
            Self::Idle | Self::Submitting => None,
        }
    }
}

/// What a call to `submit` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The lead was written to the store
    Stored,
    /// A submission was already in flight; nothing happened
    Ignored,
}

/// Snapshot of a form for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormView {
    pub fields: LeadFields,
    pub state: FormState,
}

#[derive(Debug, Default)]
struct Inner {
    fields: LeadFields,
    state: FormState,
}

/// A lead-capture form bound to a store
pub struct LeadForm {
    store: Arc<dyn LeadStore>,
    events: Option<EventSink>,
    inner: Mutex<Inner>,
}

impl LeadForm {
    /// Empty form in the `Idle` state
    pub fn new(store: Arc<dyn LeadStore>) -> Self {
        Self::with_fields(store, LeadFields::default())
    }

    /// Form pre-filled with submitted values
    pub fn with_fields(store: Arc<dyn LeadStore>, fields: LeadFields) -> Self {
        Self {
            store,
            events: None,
            inner: Mutex::new(Inner {
                fields,
                state: FormState::Idle,
            }),
        }
    }

    /// Attach the audit trail
    pub fn with_events(mut self, events: Option<EventSink>) -> Self {
        self.events = events;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the field values (typing into the form)
    pub fn set_fields(&self, fields: LeadFields) {
        self.lock().fields = fields;
    }

    pub fn view(&self) -> FormView {
        let inner = self.lock();
        FormView {
            fields: inner.fields.clone(),
            state: inner.state,
        }
    }

    /// Validate the current fields and send them to the store
    ///
    /// Returns `Ok(Ignored)` without side effects if a submission is already
    /// running. On success the fields are cleared; on any error they are kept
    /// so the user can correct and resend. Dropping the returned future
    /// mid-insert puts the form back to `Idle`.
    pub async fn submit(&self) -> Result<SubmitOutcome, SubmitError> {
        let fields = {
            let mut inner = self.lock();
            if inner.state.is_submitting() {
                tracing::debug!("Submit ignored: submission already in flight");
                return Ok(SubmitOutcome::Ignored);
            }
            inner.state = FormState::Submitting;
            inner.fields.clone()
        };
        let mut in_flight = InFlight {
            form: self,
            email_hash: None,
            armed: true,
        };

        let lead = match fields.normalize() {
            Ok(lead) => lead,
            Err(e) => {
                tracing::info!(reason = e.kind(), "Lead rejected");
                self.emit(LeadEvent::rejected(e.kind()));
                in_flight.settle(|inner| inner.state = FormState::Error(e));
                return Err(e);
            }
        };

        let email_hash = email_fingerprint(&lead.email);
        let store = self.store.name();
        in_flight.email_hash = Some(email_hash.clone());

        match self.store.insert_lead(&lead).await {
            Ok(()) => {
                tracing::info!(email_hash = %email_hash, store, "Lead submitted");
                self.emit(LeadEvent::submitted(&lead, store));

                in_flight.settle(|inner| {
                    inner.fields = LeadFields::default();
                    inner.state = FormState::Success;
                });
                Ok(SubmitOutcome::Stored)
            }
            Err(e) => {
                // Cause stays in the logs; the user only sees the generic message
                tracing::warn!(email_hash = %email_hash, store, error = %e, "Lead insert failed");
                self.emit(LeadEvent::failed(&lead, store, &e.to_string()));

                in_flight.settle(|inner| {
                    inner.state = FormState::Error(SubmitError::Persistence);
                });
                Err(SubmitError::Persistence)
            }
        }
    }

    fn emit(&self, event: LeadEvent) {
        if let Some(events) = &self.events {
            events.emit(event);
        }
    }
}

/// Claim on a form's `Submitting` state
///
/// Settled explicitly on every outcome. If the submit future is dropped first
/// the form goes back to `Idle` (fields kept) so it is never stuck.
struct InFlight<'a> {
    form: &'a LeadForm,
    email_hash: Option<String>,
    armed: bool,
}

impl InFlight<'_> {
    fn settle(mut self, update: impl FnOnce(&mut Inner)) {
        self.armed = false;
        let mut inner = self.form.lock();
        update(&mut *inner);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.form.lock().state = FormState::Idle;

        let store = self.form.store.name();
        match self.email_hash.take() {
            Some(email_hash) => {
                tracing::warn!(
                    email_hash = %email_hash,
                    store,
                    "Lead submission abandoned mid-insert"
                );
                self.form.emit(LeadEvent::abandoned(&email_hash, store));
            }
            None => tracing::warn!(store, "Lead submission abandoned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::{Lead, MemoryLeadStore, StoreError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::{mpsc, Notify};

    /// Store that fails every insert and counts attempts
    #[derive(Default)]
    struct FailingStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LeadStore for FailingStore {
        async fn insert_lead(&self, _lead: &Lead) -> Result<(), StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Rejected {
                status: 500,
                code: Some("42P01".to_string()),
                message: Some("relation \"leads\" does not exist".to_string()),
            })
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    /// Store that waits for a signal before delegating to memory
    struct GatedStore {
        gate: Arc<Notify>,
        inner: MemoryLeadStore,
    }

    #[async_trait]
    impl LeadStore for GatedStore {
        async fn insert_lead(&self, lead: &Lead) -> Result<(), StoreError> {
            self.gate.notified().await;
            self.inner.insert_lead(lead).await
        }

        fn name(&self) -> &'static str {
            "gated"
        }
    }

    fn fields(name: &str, email: &str) -> LeadFields {
        LeadFields {
            name: name.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_form_is_idle() {
        let form = LeadForm::new(Arc::new(MemoryLeadStore::new()));
        assert_eq!(form.view().state, FormState::Idle);
        assert_eq!(form.view().state.banner(), None);
        assert_eq!(form.view().fields, LeadFields::default());
    }

    #[tokio::test]
    async fn test_blank_email_never_reaches_store() {
        let store = Arc::new(FailingStore::default());
        let form = LeadForm::with_fields(store.clone(), fields("Jo", "   "));

        let result = form.submit().await;

        assert_eq!(result, Err(SubmitError::Validation));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
        assert_eq!(form.view().state, FormState::Error(SubmitError::Validation));
        assert_eq!(
            form.view().state.banner().as_deref(),
            Some("Please enter a valid email.")
        );
        // Fields kept for correction
        assert_eq!(form.view().fields.name, "Jo");
    }

    #[tokio::test]
    async fn test_success_clears_fields_and_normalizes() {
        let store = MemoryLeadStore::new();
        let form = LeadForm::with_fields(Arc::new(store.clone()), fields("  Jo  ", "a@b.com"));

        assert_eq!(form.submit().await, Ok(SubmitOutcome::Stored));

        assert_eq!(form.view().state, FormState::Success);
        assert_eq!(
            form.view().state.banner().as_deref(),
            Some("Thanks! We'll be in touch soon.")
        );
        assert_eq!(form.view().fields, LeadFields::default());

        let stored = store.leads();
        assert_eq!(stored.len(), 1);
        assert_eq!(
            stored[0].lead,
            Lead {
                name: Some("Jo".to_string()),
                email: "a@b.com".to_string(),
                company: None,
                message: None,
            }
        );
    }

    #[tokio::test]
    async fn test_store_failure_keeps_fields_and_hides_cause() {
        let store = Arc::new(FailingStore::default());
        let form = LeadForm::with_fields(store.clone(), fields("Jo", "a@b.com"));

        assert_eq!(form.submit().await, Err(SubmitError::Persistence));

        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        assert_eq!(form.view().fields, fields("Jo", "a@b.com"));
        let banner = form.view().state.banner().unwrap();
        assert_eq!(banner, "Something went wrong. Please try again.");
        assert!(!banner.contains("relation"));
    }

    #[tokio::test]
    async fn test_form_is_reusable_after_error() {
        let store = MemoryLeadStore::new();
        let form = LeadForm::with_fields(Arc::new(store.clone()), fields("Jo", ""));

        assert_eq!(form.submit().await, Err(SubmitError::Validation));

        form.set_fields(fields("Jo", "jo@example.com"));
        assert_eq!(form.submit().await, Ok(SubmitOutcome::Stored));
        assert_eq!(form.view().state, FormState::Success);
        assert_eq!(store.leads().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_while_in_flight_is_ignored() {
        let gate = Arc::new(Notify::new());
        let memory = MemoryLeadStore::new();
        let store = Arc::new(GatedStore {
            gate: gate.clone(),
            inner: memory.clone(),
        });
        let form = Arc::new(LeadForm::with_fields(store, fields("Jo", "a@b.com")));

        let first = {
            let form = form.clone();
            tokio::spawn(async move { form.submit().await })
        };

        while !form.view().state.is_submitting() {
            tokio::task::yield_now().await;
        }
        assert_eq!(form.view().state.banner(), None);

        assert_eq!(form.submit().await, Ok(SubmitOutcome::Ignored));

        gate.notify_one();
        assert_eq!(first.await.unwrap(), Ok(SubmitOutcome::Stored));
        assert_eq!(memory.leads().len(), 1);
        assert_eq!(form.view().state, FormState::Success);
    }

    #[tokio::test]
    async fn test_identical_submissions_are_not_deduplicated() {
        let store = MemoryLeadStore::new();
        let form = LeadForm::new(Arc::new(store.clone()));

        form.set_fields(fields("Jo", "a@b.com"));
        form.submit().await.unwrap();
        form.set_fields(fields("Jo", "a@b.com"));
        form.submit().await.unwrap();

        let leads = store.leads();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].lead, leads[1].lead);
        assert_ne!(leads[0].id, leads[1].id);
    }

    #[tokio::test]
    async fn test_outcomes_are_audited() {
        let (tx, mut rx) = mpsc::channel(8);
        let form = LeadForm::with_fields(Arc::new(MemoryLeadStore::new()), fields("", ""))
            .with_events(Some(EventSink::new(tx)));

        let _ = form.submit().await;
        form.set_fields(fields("", "a@b.com"));
        form.submit().await.unwrap();

        assert!(matches!(
            rx.recv().await,
            Some(LeadEvent::Rejected { ref reason, .. }) if reason == "validation"
        ));
        assert!(matches!(
            rx.recv().await,
            Some(LeadEvent::Submitted { has_name: false, .. })
        ));
    }

    #[tokio::test]
    async fn test_dropped_submit_releases_the_form() {
        let gate = Arc::new(Notify::new());
        let memory = MemoryLeadStore::new();
        let store = Arc::new(GatedStore {
            gate: gate.clone(),
            inner: memory.clone(),
        });
        let (tx, mut rx) = mpsc::channel(8);
        let form = LeadForm::with_fields(store, fields("Jo", "a@b.com"))
            .with_events(Some(EventSink::new(tx)));

        let timed_out =
            tokio::time::timeout(std::time::Duration::from_millis(20), form.submit()).await;
        assert!(timed_out.is_err());

        assert_eq!(form.view().state, FormState::Idle);
        assert_eq!(form.view().fields, fields("Jo", "a@b.com"));
        assert!(matches!(
            rx.recv().await,
            Some(LeadEvent::Abandoned { ref store, .. }) if store == "gated"
        ));

        gate.notify_one();
        assert_eq!(form.submit().await, Ok(SubmitOutcome::Stored));
        assert_eq!(memory.leads().len(), 1);
    }

    #[tokio::test]
    async fn test_store_rejection_never_leaks_email() {
        use crate::leads::RestLeadStore;
        use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "code": "23505",
                "details": "Key (email)=(jo@example.com) already exists.",
                "hint": null,
                "message": "duplicate key value violates unique constraint \"leads_email_key\"",
            })))
            .mount(&server)
            .await;

        let store = RestLeadStore::with_client(reqwest::Client::new(), &server.uri(), "leads", "k");
        let (tx, mut rx) = mpsc::channel(8);
        let form = LeadForm::with_fields(Arc::new(store), fields("Jo", "jo@example.com"))
            .with_events(Some(EventSink::new(tx)));

        assert_eq!(form.submit().await, Err(SubmitError::Persistence));

        let event = rx.recv().await.unwrap();
        let line = serde_json::to_string(&event).unwrap();
        assert!(line.contains(r#""type":"failed""#));
        assert!(line.contains("23505"));
        assert!(!line.contains("jo@example.com"));
    }
}
