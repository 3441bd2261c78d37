// Web module - HTTP surface for the landing page
//
// Routes:
// - GET  /           landing page
// - POST /leads      form post (re-renders the page with a banner)
// - POST /api/leads  JSON submission
// - GET  /health     liveness probe
//
// Every submission builds its own `LeadForm`, so requests share nothing but
// the store handle and the audit channel.

mod error;
mod handlers;
mod page;
mod server;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::config::SiteConfig;
use crate::events::EventSink;
use crate::leads::LeadStore;
use crate::submission::LeadForm;

pub use server::start_server;

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn LeadStore>,
    events: Option<EventSink>,
    site: Arc<SiteConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn LeadStore>, events: Option<EventSink>, site: SiteConfig) -> Self {
        Self {
            store,
            events,
            site: Arc::new(site),
        }
    }

    /// Fresh form bound to the shared store
    fn form(&self) -> LeadForm {
        LeadForm::new(self.store.clone()).with_events(self.events.clone())
    }
}

/// JSON body for `/api/leads` responses
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub status: &'static str,
    pub message: String,
}

impl SubmitResponse {
    pub fn success(message: String) -> Self {
        Self {
            status: "success",
            message,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            status: "error",
            message,
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/leads", post(handlers::submit_form))
        .route("/api/leads", post(handlers::submit_json))
        .route("/health", get(handlers::health))
        .with_state(state)
}
