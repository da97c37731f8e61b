//! Access gate for the debug entry point.
//!
//! # Data Flow
//! ```text
//! construction:
//!     config dir → config::load → Settings (once)
//!
//! per request:
//!     caller builds RequestContext
//!     → evaluator.rs (ordered guards)
//!     → allow / deny (+ fixed 403 status line and message)
//! ```
//!
//! # Design Decisions
//! - The evaluator never touches ambient state; the context is always explicit
//! - Settings are read-only after construction, so the gate is shared freely

pub mod context;
pub mod evaluator;

use std::path::Path;

use tracing::debug;

use crate::config::{self, FileLocator, Settings, DEFAULT_CONFIG_DIR};

pub use context::RequestContext;
pub use evaluator::{
    evaluate, is_accessible, AllowReason, DenyReason, Verdict, FORBIDDEN_MESSAGE,
    FORBIDDEN_STATUS_LINE,
};

/// Decides whether the debug entry point may be served.
#[derive(Debug, Clone)]
pub struct AccessGate {
    settings: Settings,
}

impl AccessGate {
    /// Gate configured from [`DEFAULT_CONFIG_DIR`].
    pub fn new() -> Self {
        Self::from_config_dir(DEFAULT_CONFIG_DIR)
    }

    /// Gate configured from the parameters file in `dir`.
    pub fn from_config_dir(dir: impl AsRef<Path>) -> Self {
        Self::from_settings(config::load(dir.as_ref()))
    }

    /// Gate configured from `dir`, resolving the file through `locator`.
    pub fn with_locator(dir: impl AsRef<Path>, locator: &dyn FileLocator) -> Self {
        Self::from_settings(config::load_with(dir.as_ref(), locator))
    }

    pub fn from_settings(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn evaluate(&self, request: &RequestContext) -> Verdict {
        let verdict = evaluate(&self.settings, request);
        if let Verdict::Denied(reason) = verdict {
            debug!(
                %reason,
                remote_addr = request.remote_addr.as_deref().unwrap_or("-"),
                sapi = %request.sapi_name,
                "Debug entry point denied"
            );
        }
        verdict
    }

    pub fn is_accessible(&self, request: &RequestContext) -> bool {
        self.evaluate(request).is_allowed()
    }

    /// Check the live process environment.
    pub fn is_accessible_from_env(&self) -> bool {
        self.is_accessible(&RequestContext::from_env())
    }

    pub fn forbidden_message(&self) -> &'static str {
        FORBIDDEN_MESSAGE
    }

    pub fn forbidden_status_line(&self) -> &'static str {
        FORBIDDEN_STATUS_LINE
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new()
    }
}
