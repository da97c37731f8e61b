//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! <config_dir>/parameters.yml (or .yaml / .toml)
//!     → locator.rs (resolve file in config dir)
//!     → loader.rs (read, parse to key/value tree, extract keys)
//!     → Settings (immutable, defaults per missing key)
//! ```
//!
//! # Design Decisions
//! - Loading never fails for the caller: missing or broken files yield defaults
//! - The fallible path (`try_load`) stays public so both outcomes are testable
//! - Config is immutable once loaded; there is no reload

pub mod loader;
pub mod locator;
pub mod schema;

pub use loader::{load, load_with, parse_loose_bool, try_load, ConfigError};
pub use locator::{FileLocator, FsLocator};
pub use schema::Settings;

/// Configuration directory used when none is given.
pub const DEFAULT_CONFIG_DIR: &str = "app/config";
