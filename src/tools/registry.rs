//! Tool registry for managing tool handlers.
//!
//! Provides a `ToolHandler` trait for implementing tools and a `ToolRegistry`
//! for registering and invoking them by id.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{InvokeError, InvokeResult};
use crate::manifest::ToolDescriptor;

/// JSON object type used for tool parameters and schemas.
pub type JsonObject = serde_json::Map<String, Value>;

/// Trait for handling tool invocations.
///
/// Each tool implements this trait to define its schema and its validation
/// and compute logic. Invocation is a pure function of the parameters.
pub trait ToolHandler: Send + Sync {
    /// Returns the tool's id (e.g., "add").
    fn id(&self) -> &str;

    /// Returns the tool's human-readable name.
    fn name(&self) -> &str;

    /// Returns the tool's description.
    fn description(&self) -> &str;

    /// Returns the JSON-Schema-like parameter specification.
    fn params_schema(&self) -> JsonObject;

    /// Validates the parameters and computes the tool's result payload.
    fn invoke(&self, params: &JsonObject) -> InvokeResult<Value>;

    /// Converts this handler to a `ToolDescriptor` for the manifest.
    fn to_descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            id: self.id().to_string(),
            name: self.name().to_string(),
            description: self.description().to_string(),
            params: Value::Object(self.params_schema()),
        }
    }
}

/// Registry for managing tool handlers.
///
/// Handlers are keyed by id in ascending order, so listings are stable.
#[derive(Clone)]
pub struct ToolRegistry {
    handlers: BTreeMap<String, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Register a tool handler.
    pub fn register(mut self, handler: Arc<dyn ToolHandler>) -> Self {
        self.handlers.insert(handler.id().to_string(), handler);
        self
    }

    /// Register a tool handler from a type that implements `ToolHandler`.
    pub fn register_handler<T: ToolHandler + 'static>(mut self, handler: T) -> Self {
        self.handlers.insert(handler.id().to_string(), Arc::new(handler));
        self
    }

    /// Get a tool handler by id.
    pub fn get(&self, id: &str) -> Option<Arc<dyn ToolHandler>> {
        self.handlers.get(id).cloned()
    }

    /// List all registered tool ids.
    pub fn list_ids(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    /// Get all registered tools as manifest descriptors.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.handlers
            .values()
            .map(|handler| handler.to_descriptor())
            .collect()
    }

    /// Execute a tool by id with the given parameters.
    pub fn call_tool(&self, id: &str, params: &JsonObject) -> InvokeResult<Value> {
        let handler = self
            .get(id)
            .ok_or_else(|| InvokeError::UnknownTool(id.to_string()))?;
        handler.invoke(params)
    }

    /// Check if a tool with the given id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.handlers.contains_key(id)
    }

    /// Return the number of registered tools.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Return `true` if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
