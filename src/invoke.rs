//! Invocation requests and responses.
//!
//! An invocation names a tool, carries its parameters and an optional
//! `callId` that is echoed back unmodified.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{InvokeError, InvokeResult};
use crate::tools::{JsonObject, ToolRegistry};

/// Status reported by every successful invocation.
pub const STATUS_OK: &str = "ok";

/// A parsed invocation request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InvokeRequest {
    /// Tool id. Any JSON value is accepted; only strings can match a tool.
    #[serde(default)]
    pub tool: Value,
    /// Tool parameters. Missing or non-object values are treated as empty.
    #[serde(default, deserialize_with = "object_or_empty")]
    pub params: JsonObject,
    #[serde(default, rename = "callId")]
    pub call_id: Value,
}

fn object_or_empty<'de, D>(deserializer: D) -> Result<JsonObject, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    })
}

impl InvokeRequest {
    /// Parse a request from a raw body. The body must be a JSON object.
    pub fn from_slice(body: &[u8]) -> InvokeResult<Self> {
        match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => {
                serde_json::from_value(value).map_err(|_| InvokeError::InvalidBody)
            }
            _ => Err(InvokeError::InvalidBody),
        }
    }

    /// The tool id as used in dispatch and error messages.
    ///
    /// Strings are used as-is; anything else is rendered as JSON text, so a
    /// missing tool reads as `null`.
    pub fn tool_id(&self) -> String {
        match &self.tool {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// A successful invocation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeResponse {
    #[serde(rename = "callId")]
    pub call_id: Value,
    pub tool: String,
    pub result: Value,
    pub status: String,
}

/// Dispatch a parsed request through the registry.
pub fn dispatch(registry: &ToolRegistry, request: InvokeRequest) -> InvokeResult<InvokeResponse> {
    let tool = match &request.tool {
        Value::String(id) if registry.contains(id) => id.clone(),
        _ => return Err(InvokeError::UnknownTool(request.tool_id())),
    };

    let result = registry.call_tool(&tool, &request.params)?;

    Ok(InvokeResponse {
        call_id: request.call_id,
        tool,
        result,
        status: STATUS_OK.to_string(),
    })
}

/// Parse a raw body and dispatch it, logging the outcome.
pub fn invoke(registry: &ToolRegistry, body: &[u8]) -> InvokeResult<InvokeResponse> {
    let request = InvokeRequest::from_slice(body).inspect_err(|_| {
        warn!("Rejected invocation: invalid JSON body ({} bytes)", body.len());
    })?;

    debug!(
        "Invocation request: tool={} call_id={} params={:?}",
        request.tool_id(),
        request.call_id,
        request.params
    );

    let tool = request.tool_id();
    match dispatch(registry, request) {
        Ok(response) => {
            info!("Invoked tool '{}' (call_id={})", response.tool, response.call_id);
            Ok(response)
        }
        Err(e) => {
            warn!("Invocation of tool '{}' failed: {}", tool, e);
            Err(e)
        }
    }
}
