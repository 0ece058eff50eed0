// HTTP endpoints: landing page, manifest discovery, tool invocation, health

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, header},
    response::{
        Html, IntoResponse, Json, Response,
        sse::{Event, Sse},
    },
    routing::{get, post},
};
use futures_util::stream;
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::error::InvokeError;
use crate::invoke::{InvokeResponse, invoke};
use crate::manifest::{Manifest, ManifestMode};
use crate::tools::ToolRegistry;


const INDEX_HTML: &str = include_str!("index.html");

/// Shared, immutable state for every request.
#[derive(Clone)]
pub struct AppState {
    manifest_json: Arc<str>,
    registry: Arc<ToolRegistry>,
    manifest_mode: ManifestMode,
}

impl AppState {
    /// Build the state, serializing the manifest once up front.
    pub fn new(
        manifest: &Manifest,
        registry: Arc<ToolRegistry>,
        manifest_mode: ManifestMode,
    ) -> serde_json::Result<Self> {
        let manifest_json = manifest.to_json_string()?.into();
        Ok(Self {
            manifest_json,
            registry,
            manifest_mode,
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/mcp", get(manifest))
        .route("/mcp/invoke", post(invoke_tool))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Serve the manifest as plain JSON or as a single SSE frame.
async fn manifest(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok());
    let body = state.manifest_json.to_string();

    if state.manifest_mode.wants_sse(accept) {
        debug!("Serving manifest as an SSE frame");
        let event = Event::default().data(body);
        return Sse::new(stream::once(async move { Ok::<_, Infallible>(event) })).into_response();
    }

    debug!("Serving manifest as JSON");
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Bodies the extractor refuses (too large, unreadable) are reported as
/// `Invalid JSON body` rather than the extractor's own status.
async fn invoke_tool(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<InvokeResponse>, InvokeError> {
    let body = body.map_err(|rejection| {
        warn!("Rejected invocation body: {}", rejection.body_text());
        InvokeError::InvalidBody
    })?;
    invoke(&state.registry, &body).map(Json)
}
