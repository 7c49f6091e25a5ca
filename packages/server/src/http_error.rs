//! HTTP error handling
//!
//! Provides the JSON error body returned by every failing endpoint and
//! the mapping from service-layer errors to HTTP statuses.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use skillvault_core::services::NodeServiceError;

/// JSON error response body
///
/// `code` is the machine-readable error kind; `fields` is only present
/// on validation failures and maps each offending field to its
/// message.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpError {
    /// User-facing error message
    pub message: String,
    /// Machine-readable error code
    pub code: String,
    /// Per-field messages for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

impl HttpError {
    /// Create a new HTTP error
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            fields: None,
        }
    }

    /// Create a validation error carrying per-field messages
    pub fn validation(fields: BTreeMap<String, String>) -> Self {
        Self {
            message: "Request validation failed".to_string(),
            code: "VALIDATION_ERROR".to_string(),
            fields: Some(fields),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = match self.code.as_str() {
            "NODE_NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" | "BAD_REQUEST" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

impl From<NodeServiceError> for HttpError {
    fn from(err: NodeServiceError) -> Self {
        match err {
            NodeServiceError::NodeNotFound { .. } | NodeServiceError::InvalidParent { .. } => {
                HttpError::new(err.to_string(), "NODE_NOT_FOUND")
            }
            NodeServiceError::HierarchyViolation(_)
            | NodeServiceError::CircularReference { .. } => {
                HttpError::new(err.to_string(), "BAD_REQUEST")
            }
            NodeServiceError::StoreFailed(_) => HttpError::new(err.to_string(), "INTERNAL_ERROR"),
        }
    }
}
