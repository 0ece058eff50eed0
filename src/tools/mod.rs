//! Tool handler registry and the tools this server exposes.
//!
//! New tools are added by implementing `ToolHandler` and registering them in
//! `default_registry`; dispatch never changes.

mod registry;

pub use registry::{JsonObject, ToolHandler, ToolRegistry};

// Tool handler implementations
mod add;

pub use add::{AddToolHandler, add_numbers};

/// Build the registry with every built-in tool.
pub fn default_registry() -> ToolRegistry {
    ToolRegistry::new().register_handler(AddToolHandler::new())
}
