//! Gate middleware.
//! Rejects requests the access gate does not allow before they reach the
//! debug handlers.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::gate::{AccessGate, RequestContext};

/// State required by the gate middleware.
#[derive(Clone)]
pub struct GateState {
    pub gate: Arc<AccessGate>,
    /// Serving mode reported to the gate for every request.
    pub sapi_name: String,
}

impl GateState {
    pub fn new(gate: AccessGate, sapi_name: impl Into<String>) -> Self {
        Self {
            gate: Arc::new(gate),
            sapi_name: sapi_name.into(),
        }
    }
}

pub async fn dev_gate_middleware(
    State(state): State<GateState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    // Peer address comes from `into_make_service_with_connect_info`; without it
    // the caller is unknown and gets denied.
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let ctx = RequestContext::from_parts(req.headers(), peer, state.sapi_name.as_str());

    if state.gate.is_accessible(&ctx) {
        next.run(req).await
    } else {
        forbidden(&state.gate)
    }
}

fn forbidden(gate: &AccessGate) -> Response {
    (
        StatusCode::FORBIDDEN,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        gate.forbidden_message(),
    )
        .into_response()
}
