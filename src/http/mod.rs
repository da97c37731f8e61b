//! HTTP front-controller adapter subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (peer address via ConnectInfo)
//!     → server.rs (Axum setup, tracing)
//!     → middleware.rs (RequestContext from headers + peer, gate check)
//!         denied  → 403 Forbidden + fixed message
//!         allowed → debug entry point handler
//! ```

pub mod middleware;
pub mod server;

pub use middleware::{dev_gate_middleware, GateState};
pub use server::DebugServer;
