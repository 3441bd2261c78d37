//! Hosted store over its REST insert endpoint
//!
//! Speaks the PostgREST dialect used by Supabase:
//! `POST {base_url}/rest/v1/{table}` with a JSON array of rows, the project
//! key in both `apikey` and `Authorization: Bearer`, and
//! `Prefer: return=minimal` so the store answers without echoing the row.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;

use super::{Lead, LeadStore, StoreError};
use crate::config::StoreConfig;
use crate::util::truncate_utf8_safe;

/// Upper bound on how much of a rejection message we keep for logs
const MAX_ERROR_MESSAGE: usize = 256;

/// The parts of a PostgREST error body that never carry row data
#[derive(Debug, Default, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
}

/// REST-backed lead store
#[derive(Clone)]
pub struct RestLeadStore {
    client: reqwest::Client,
    insert_url: String,
    api_key: String,
}

impl RestLeadStore {
    /// Build a store from configuration
    ///
    /// `timeout_secs = 0` leaves the request unbounded; the call resolves or
    /// fails on the store's own terms.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            anyhow::bail!(
                "store.url is not set; set LANDIFY_STORE_URL or use backend = \"memory\""
            );
        }

        let mut builder = reqwest::Client::builder().pool_max_idle_per_host(4);
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self::with_client(
            client,
            &config.url,
            &config.table,
            &config.api_key,
        ))
    }

    /// Build a store around an existing client
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        table: &str,
        api_key: &str,
    ) -> Self {
        let insert_url = format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table);
        Self {
            client,
            insert_url,
            api_key: api_key.to_string(),
        }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("prefer", HeaderValue::from_static("return=minimal"));

        // An unset or malformed key just omits the auth headers; the store
        // answers 401 and that surfaces as a rejection.
        if !self.api_key.is_empty() {
            let key = HeaderValue::from_str(&self.api_key);
            let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key));
            if let (Ok(key), Ok(bearer)) = (key, bearer) {
                headers.insert("apikey", key);
                headers.insert(AUTHORIZATION, bearer);
            }
        }
        headers
    }
}

#[async_trait]
impl LeadStore for RestLeadStore {
    async fn insert_lead(&self, lead: &Lead) -> Result<(), StoreError> {
        let response = self
            .client
            .post(&self.insert_url)
            .headers(self.headers())
            .json(&[lead])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let error = serde_json::from_str::<PostgrestError>(&body).unwrap_or_default();
        Err(StoreError::Rejected {
            status: status.as_u16(),
            code: error.code,
            message: error
                .message
                .map(|m| truncate_utf8_safe(&m, MAX_ERROR_MESSAGE).to_string()),
        })
    }

    fn name(&self) -> &'static str {
        "rest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn lead() -> Lead {
        Lead {
            name: Some("Jo".to_string()),
            email: "a@b.com".to_string(),
            company: None,
            message: None,
        }
    }

    fn store_for(server: &MockServer) -> RestLeadStore {
        RestLeadStore::with_client(reqwest::Client::new(), &server.uri(), "leads", "anon-key")
    }

    #[tokio::test]
    async fn test_insert_posts_single_row_array() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/leads"))
            .and(header("apikey", "anon-key"))
            .and(header("authorization", "Bearer anon-key"))
            .and(header("prefer", "return=minimal"))
            .and(body_json(serde_json::json!([{
                "name": "Jo",
                "email": "a@b.com",
                "company": null,
                "message": null,
            }])))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        store_for(&server).insert_lead(&lead()).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/leads"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"message":"Invalid API key"}"#),
            )
            .mount(&server)
            .await;

        let err = store_for(&server).insert_lead(&lead()).await.unwrap_err();
        match err {
            StoreError::Rejected {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 401);
                assert_eq!(code, None);
                assert_eq!(message.as_deref(), Some("Invalid API key"));
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejection_drops_row_details() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/leads"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "code": "23505",
                "details": "Key (email)=(a@b.com) already exists.",
                "hint": null,
                "message": "duplicate key value violates unique constraint \"leads_email_key\"",
            })))
            .mount(&server)
            .await;

        let err = store_for(&server).insert_lead(&lead()).await.unwrap_err();
        let text = err.to_string();
        assert!(text.contains("409"));
        assert!(text.contains("23505"));
        assert!(!text.contains("a@b.com"));
        assert!(!format!("{:?}", err).contains("a@b.com"));
    }

    #[tokio::test]
    async fn test_non_json_rejection_keeps_status_only() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let err = store_for(&server).insert_lead(&lead()).await.unwrap_err();
        assert_eq!(err.to_string(), "store rejected insert with status 502");
    }

    #[tokio::test]
    async fn test_configured_timeout_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/leads"))
            .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let config = StoreConfig {
            url: server.uri(),
            api_key: "anon-key".to_string(),
            timeout_secs: 1,
            ..StoreConfig::default()
        };
        let store = RestLeadStore::from_config(&config).unwrap();

        let err = store.insert_lead(&lead()).await.unwrap_err();
        match err {
            StoreError::Transport(e) => assert!(e.is_timeout()),
            other => panic!("Expected Transport, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_store_is_transport_error() {
        // Nothing listens on port 1
        let store =
            RestLeadStore::with_client(reqwest::Client::new(), "http://127.0.0.1:1", "leads", "k");
        let err = store.insert_lead(&lead()).await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));
    }

    #[test]
    fn test_insert_url_tolerates_trailing_slash() {
        let store = RestLeadStore::with_client(
            reqwest::Client::new(),
            "https://abc.supabase.co/",
            "leads",
            "k",
        );
        assert_eq!(store.insert_url, "https://abc.supabase.co/rest/v1/leads");
    }

    #[test]
    fn test_from_config_requires_url() {
        let config = StoreConfig::default();
        assert!(RestLeadStore::from_config(&config).is_err());
    }
}
