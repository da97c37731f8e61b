//! Access gate for debug-mode entry points.

pub mod config;
pub mod gate;
pub mod http;
pub mod observability;

pub use config::Settings;
pub use gate::{AccessGate, RequestContext, Verdict};
pub use http::DebugServer;
