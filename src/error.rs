//! Error types for tool invocation.
//!
//! Every variant maps to an HTTP status and is rendered to the caller as
//! `{"error": "<message>"}`.

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Message returned when the request body is not a JSON object.
pub const INVALID_JSON_BODY: &str = "Invalid JSON body";

/// Errors that can occur while handling an invocation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeError {
    /// The body could not be parsed as a JSON object.
    InvalidBody,

    /// The tool rejected its parameters.
    InvalidParams(String),

    /// No tool is registered under the requested id.
    UnknownTool(String),
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBody => f.write_str(INVALID_JSON_BODY),
            Self::InvalidParams(msg) => f.write_str(msg),
            Self::UnknownTool(id) => write!(f, "Unknown tool: {}", id),
        }
    }
}

impl std::error::Error for InvokeError {}

/// Result type for invocation operations.
pub type InvokeResult<T> = Result<T, InvokeError>;

impl InvokeError {
    /// Create an invalid parameters error.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidBody | Self::InvalidParams(_) => StatusCode::BAD_REQUEST,
            Self::UnknownTool(_) => StatusCode::NOT_FOUND,
        }
    }

    /// The `{"error": ...}` payload sent back to the caller.
    pub fn to_json(&self) -> serde_json::Value {
        json!({ "error": self.to_string() })
    }
}

impl IntoResponse for InvokeError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(InvokeError::InvalidBody.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            InvokeError::invalid_params("nope").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            InvokeError::UnknownTool("multiply".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(InvokeError::InvalidBody.to_string(), "Invalid JSON body");
        assert_eq!(
            InvokeError::UnknownTool("multiply".into()).to_string(),
            "Unknown tool: multiply"
        );
        assert_eq!(
            InvokeError::invalid_params("a and b must be numbers").to_json(),
            json!({ "error": "a and b must be numbers" })
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = InvokeError::UnknownTool("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
