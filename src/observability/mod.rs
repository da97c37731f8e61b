//! Observability subsystem.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Gate decisions are logged at debug level only; there is no audit trail

pub mod logging;
