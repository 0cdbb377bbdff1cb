//! Webhook HTTP endpoints
//!
//! The inbound contract is fixed and deliberately uninformative:
//!
//! - `POST /present` and `POST /cleanup`, JSON body `{fqdn, domain, value}`
//! - 200 with a short message on success
//! - 404 `{"error":"Not Found"}` for any other method or path
//! - 501 `{"error":"Failed to process request"}` for every internal
//!   failure; the cause is only logged, tagged with a per-request
//!   correlation id so operators can trace it

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use axum::routing::post;
use serde_json::json;
use tracing::{Instrument, error, info};
use uuid::Uuid;

use dns01_core::{ChallengeEngine, ChallengeRequest, LogOptions, Operation};

/// Shared state for the webhook handlers
#[derive(Clone)]
pub struct AppState {
    engine: Arc<ChallengeEngine>,
    log: LogOptions,
}

/// Create the webhook router
pub fn create_router(engine: Arc<ChallengeEngine>, log: LogOptions) -> Router {
    let state = AppState { engine, log };

    Router::new()
        .route("/present", post(present).fallback(not_found))
        .route("/cleanup", post(cleanup).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
}

/// Bind and run the webhook server
pub async fn run_server(addr: SocketAddr, app: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "Dynadot DNS-01 Challenge Handler running on port {}",
        addr.port()
    );
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn present(State(state): State<AppState>, body: Bytes) -> Response {
    handle(state, Operation::Present, "/present", body).await
}

async fn cleanup(State(state): State<AppState>, body: Bytes) -> Response {
    handle(state, Operation::Cleanup, "/cleanup", body).await
}

async fn handle(state: AppState, op: Operation, path: &'static str, body: Bytes) -> Response {
    let correlation_id = Uuid::new_v4();
    let span = tracing::info_span!("request", %correlation_id);

    async move {
        info!("Received request: POST {path}");

        if state.log.request_body {
            info!("Incoming request body: {}", String::from_utf8_lossy(&body));
        }

        let request: ChallengeRequest = match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(e) => {
                error!("Error: invalid request body: {e}");
                return failure();
            }
        };

        match state.engine.apply(op, &request).await {
            Ok(()) => (
                StatusCode::OK,
                Json(json!({ "message": format!("TXT record {}", op.outcome()) })),
            )
                .into_response(),
            Err(e) => {
                error!("Error: {e}");
                failure()
            }
        }
    }
    .instrument(span)
    .await
}

/// The uniform failure response; every internal error collapses into it
fn failure() -> Response {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(json!({ "error": "Failed to process request" })),
    )
        .into_response()
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" }))).into_response()
}

/// Resolve on SIGTERM or SIGINT
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                error!("Failed to setup SIGTERM handler: {e}");
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM"),
            _ = tokio::signal::ctrl_c() => info!("Received SIGINT"),
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received SIGINT");
    }
}
