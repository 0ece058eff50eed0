//! Local commands run by the binary without starting the HTTP server.

use anyhow::{Result, anyhow};
use serde_json::Value;

use crate::invoke::{InvokeRequest, dispatch};
use crate::manifest::{Manifest, ManifestInfo};
use crate::tools::{JsonObject, ToolRegistry};

/// Text produced by a command and whether it succeeded.
///
/// Successful output belongs on stdout, failures on stderr with a non-zero
/// exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

/// Render the manifest as pretty JSON or as a single SSE frame.
pub fn render_manifest(info: &ManifestInfo, registry: &ToolRegistry, sse: bool) -> Result<String> {
    let manifest = Manifest::from_registry(info, registry);
    if sse {
        Ok(manifest.to_sse_frame()?)
    } else {
        Ok(serde_json::to_string_pretty(&manifest)?)
    }
}

/// Invoke a tool locally through the same dispatch path as `POST /mcp/invoke`.
///
/// `params` must be a JSON object. `call_id` is parsed as JSON when it is
/// valid JSON and kept as a plain string otherwise.
pub fn call_tool(
    registry: &ToolRegistry,
    tool: &str,
    params: &str,
    call_id: Option<String>,
) -> Result<CommandOutput> {
    let params: JsonObject = serde_json::from_str(params)
        .map_err(|e| anyhow!("--params must be a JSON object: {}", e))?;
    let call_id = call_id
        .map(|raw| serde_json::from_str(&raw).unwrap_or(Value::String(raw)))
        .unwrap_or(Value::Null);

    let request = InvokeRequest {
        tool: Value::String(tool.to_string()),
        params,
        call_id,
    };

    match dispatch(registry, request) {
        Ok(response) => Ok(CommandOutput {
            text: serde_json::to_string_pretty(&response)?,
            success: true,
        }),
        Err(e) => Ok(CommandOutput {
            text: e.to_json().to_string(),
            success: false,
        }),
    }
}
