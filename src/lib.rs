// Core modules
mod config;
mod error;
mod invoke;
mod manifest;
mod tools;
pub mod api;
pub mod cli;
pub mod server;

// Re-export key types and functions
pub use config::{DEFAULT_PORT, ServerConfig};
pub use error::{INVALID_JSON_BODY, InvokeError, InvokeResult};
pub use invoke::{InvokeRequest, InvokeResponse, STATUS_OK, dispatch, invoke};
pub use manifest::{Manifest, ManifestInfo, ManifestMode, ToolDescriptor};
pub use tools::{AddToolHandler, JsonObject, ToolHandler, ToolRegistry, add_numbers, default_registry};
pub use server::{create_state, start_http};
