//! HTTP error mapping for the JSON API

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::leads::SubmitError;

use super::SubmitResponse;

/// Message for request bodies that are not a JSON lead
const MALFORMED_MESSAGE: &str = "Expected a JSON lead body.";

/// Errors returned by API handlers
#[derive(Debug)]
pub enum ApiError {
    /// Input the user can fix
    Validation(String),
    /// The lead store failed; message is already generic
    Upstream(String),
    /// The body could not be decoded (status from the extractor)
    Malformed(StatusCode),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Malformed(status) => *status,
        }
    }
}

impl From<SubmitError> for ApiError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::Validation => ApiError::Validation(e.to_string()),
            SubmitError::Persistence => ApiError::Upstream(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // The rejection text can quote the request body, so only the status is kept
        tracing::debug!(status = %rejection.status(), "Undecodable lead body");
        ApiError::Malformed(rejection.status())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Validation(msg) => {
                tracing::debug!("Lead validation failed: {}", msg);
                msg
            }
            ApiError::Upstream(msg) => {
                tracing::warn!("API error: {} - {}", status, msg);
                msg
            }
            ApiError::Malformed(_) => MALFORMED_MESSAGE.to_string(),
        };

        (status, Json(SubmitResponse::error(message))).into_response()
    }
}
