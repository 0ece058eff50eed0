//! HTTP server startup.

use std::sync::Arc;

use anyhow::Result;

use crate::api::{AppState, create_router};
use crate::config::ServerConfig;
use crate::manifest::Manifest;
use crate::tools::{ToolRegistry, default_registry};

/// Build the shared application state from a config and tool registry.
pub fn create_state(config: &ServerConfig, registry: ToolRegistry) -> Result<AppState> {
    let manifest = Manifest::from_registry(&config.manifest, &registry);
    let state = AppState::new(&manifest, Arc::new(registry), config.manifest_mode)?;
    Ok(state)
}

/// Bind the listener and serve until Ctrl-C.
pub async fn start_http(config: ServerConfig) -> Result<()> {
    let registry = default_registry();
    tracing::info!(
        "Registered {} tool(s): {}",
        registry.len(),
        registry.list_ids().join(", ")
    );

    let state = create_state(&config, registry)?;
    let router = create_router(state);

    let bind = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(bind).await?;

    tracing::info!(
        "MCP HTTP server listening on http://{} (manifest mode: {})",
        bind,
        config.manifest_mode
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("MCP HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {:?}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
