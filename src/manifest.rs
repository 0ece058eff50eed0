//! Manifest describing the tools this server exposes.
//!
//! The manifest is built once at startup and served unchanged on every
//! discovery request, either as plain JSON or wrapped in a single
//! Server-Sent-Event frame.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tools::ToolRegistry;

/// Description of a single tool and its parameter schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub params: Value,
}

/// Header fields of the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestInfo {
    pub name: String,
    pub description: String,
    pub version: String,
}

impl Default for ManifestInfo {
    fn default() -> Self {
        Self {
            name: "tiny-add-mcp-python".to_string(),
            description: "A tiny MCP server exposing a single add tool.".to_string(),
            version: "0.1.0".to_string(),
        }
    }
}

/// Static description of the service and its tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub description: String,
    pub version: String,
    pub tools: Vec<ToolDescriptor>,
}

impl Manifest {
    /// Build the manifest from header info and every registered tool.
    pub fn from_registry(info: &ManifestInfo, registry: &ToolRegistry) -> Self {
        Self {
            name: info.name.clone(),
            description: info.description.clone(),
            version: info.version.clone(),
            tools: registry.descriptors(),
        }
    }

    /// Serialize to compact JSON.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Render as a single SSE frame: `data: <json>\n\n`.
    pub fn to_sse_frame(&self) -> serde_json::Result<String> {
        Ok(format!("data: {}\n\n", self.to_json_string()?))
    }
}

/// How the manifest is delivered on `GET /mcp`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ManifestMode {
    /// Always plain JSON.
    Json,
    /// Always a single SSE frame.
    Sse,
    /// SSE when the client accepts `text/event-stream`, JSON otherwise.
    #[default]
    Negotiate,
}

impl ManifestMode {
    /// Decide whether to answer with an SSE frame given the `Accept` header.
    pub fn wants_sse(self, accept: Option<&str>) -> bool {
        match self {
            Self::Json => false,
            Self::Sse => true,
            Self::Negotiate => accept.is_some_and(accepts_event_stream),
        }
    }
}

/// True when `text/event-stream` is listed with a non-zero quality.
fn accepts_event_stream(accept: &str) -> bool {
    accept.split(',').any(|range| {
        let mut parts = range.split(';');
        let media = parts.next().unwrap_or_default().trim();
        if !media.eq_ignore_ascii_case("text/event-stream") {
            return false;
        }
        // `q=0` means "not acceptable"
        !parts.any(|param| {
            param
                .trim()
                .split_once('=')
                .filter(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
                .and_then(|(_, value)| value.trim().parse::<f32>().ok())
                .is_some_and(|q| q <= 0.0)
        })
    })
}

impl fmt::Display for ManifestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Sse => f.write_str("sse"),
            Self::Negotiate => f.write_str("negotiate"),
        }
    }
}

impl FromStr for ManifestMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "sse" => Ok(Self::Sse),
            "negotiate" => Ok(Self::Negotiate),
            other => Err(anyhow::anyhow!(
                "Unknown manifest mode `{}` (expected json, sse or negotiate)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::default_registry;
    use serde_json::json;

    fn manifest() -> Manifest {
        Manifest::from_registry(&ManifestInfo::default(), &default_registry())
    }

    #[test]
    fn test_manifest_shape() {
        let value = serde_json::to_value(manifest()).unwrap();
        assert_eq!(value["name"], "tiny-add-mcp-python");
        assert_eq!(value["version"], "0.1.0");

        let tools = value["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["id"], "add");
        assert_eq!(tools[0]["name"], "Add two numbers");
        assert_eq!(
            tools[0]["params"],
            json!({
                "type": "object",
                "properties": { "a": { "type": "number" }, "b": { "type": "number" } },
                "required": ["a", "b"]
            })
        );
    }

    #[test]
    fn test_field_order() {
        let text = manifest().to_json_string().unwrap();
        let name = text.find("\"name\"").unwrap();
        let description = text.find("\"description\"").unwrap();
        let version = text.find("\"version\"").unwrap();
        let tools = text.find("\"tools\"").unwrap();
        assert!(name < description && description < version && version < tools);
    }

    #[test]
    fn test_sse_frame() {
        let m = manifest();
        let frame = m.to_sse_frame().unwrap();
        assert!(frame.starts_with("data: "));
        assert!(frame.ends_with("\n\n"));

        let payload = frame.trim_start_matches("data: ").trim_end();
        let parsed: Manifest = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed, m);
    }

    #[test]
    fn test_manifest_is_stable() {
        assert_eq!(
            manifest().to_json_string().unwrap(),
            manifest().to_json_string().unwrap()
        );
    }

    #[test]
    fn test_mode_negotiation() {
        assert!(!ManifestMode::Json.wants_sse(Some("text/event-stream")));
        assert!(ManifestMode::Sse.wants_sse(None));
        assert!(!ManifestMode::Negotiate.wants_sse(None));
        assert!(!ManifestMode::Negotiate.wants_sse(Some("application/json")));
        assert!(ManifestMode::Negotiate.wants_sse(Some("text/event-stream")));
        assert!(
            ManifestMode::Negotiate
                .wants_sse(Some("application/json, Text/Event-Stream;q=0.9"))
        );
    }

    #[test]
    fn test_zero_quality_refuses_sse() {
        assert!(!ManifestMode::Negotiate.wants_sse(Some("text/event-stream;q=0")));
        assert!(!ManifestMode::Negotiate.wants_sse(Some("text/event-stream; Q=0.000")));
        assert!(
            !ManifestMode::Negotiate.wants_sse(Some("text/event-stream;q=0, application/json"))
        );
        assert!(ManifestMode::Negotiate.wants_sse(Some("text/event-stream;q=0.001")));
        assert!(ManifestMode::Sse.wants_sse(Some("text/event-stream;q=0")));
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("SSE".parse::<ManifestMode>().unwrap(), ManifestMode::Sse);
        assert_eq!(" json ".parse::<ManifestMode>().unwrap(), ManifestMode::Json);
        assert!("stream".parse::<ManifestMode>().is_err());
        assert_eq!(ManifestMode::default().to_string(), "negotiate");
    }
}
