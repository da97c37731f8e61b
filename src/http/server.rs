//! HTTP server hosting the debug entry point.
//!
//! # Responsibilities
//! - Create Axum Router with the debug handler
//! - Put the access gate in front of every route
//! - Bind server to listener with peer address info
//! - Graceful shutdown on Ctrl+C

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::IntoResponse,
    routing::any,
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::gate::AccessGate;
use crate::http::middleware::{dev_gate_middleware, GateState};

/// Server for the debug entry point, guarded by an [`AccessGate`].
pub struct DebugServer {
    router: Router,
    state: GateState,
}

impl DebugServer {
    /// Create a server reporting `sapi_name` as its serving mode.
    pub fn new(gate: AccessGate, sapi_name: impl Into<String>) -> Self {
        let state = GateState::new(gate, sapi_name);
        let router = Self::build_router(state.clone());
        Self { router, state }
    }

    fn build_router(state: GateState) -> Router {
        Router::new()
            .route("/{*path}", any(entry_point))
            .route("/", any(entry_point))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                dev_gate_middleware,
            ))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// The guarded router, for embedding or driving directly.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn gate(&self) -> &AccessGate {
        &self.state.gate
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            sapi = %self.state.sapi_name,
            "Debug server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Debug server stopped");
        Ok(())
    }
}

/// Debug entry point: echoes what it was asked for.
async fn entry_point(State(state): State<GateState>, request: Request<Body>) -> impl IntoResponse {
    Json(json!({
        "method": request.method().as_str(),
        "path": request.uri().path(),
        "sapi": state.sapi_name,
    }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
