//! Axum HTTP surface over the analysis pipeline.
//!
//! Three routes, all thin shims over the library:
//!
//! * `POST /analyze` — run the pipeline on the submitted capture
//! * `GET /health`   — fixed liveness answer, does no work
//! * `GET /`         — the embedded capture page (webcam + upload)
//!
//! Compiled only with the `server` feature so library consumers do not pull
//! in the web stack.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::analyze;
use crate::config::{AnalysisConfig, ProviderCredentials};
use crate::response::{AnalyzeRequest, ResultPayload};

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Shared, read-only state: built once at startup, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AnalysisConfig>,
    pub credentials: Arc<ProviderCredentials>,
}

impl AppState {
    pub fn new(config: AnalysisConfig, credentials: ProviderCredentials) -> Self {
        Self {
            config: Arc::new(config),
            credentials: Arc::new(credentials),
        }
    }
}

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze_whiteboard))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server until the listener fails.
pub async fn run_server(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_router(state)).await
}

// ── Handlers ─────────────────────────────────────────────────────────────

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn analyze_whiteboard(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> (StatusCode, Json<ResultPayload>) {
    let result = analyze::analyze(request.image.as_deref(), &state.config, &state.credentials).await;
    let payload = ResultPayload::from_result(result);
    let status =
        StatusCode::from_u16(payload.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(payload))
}
