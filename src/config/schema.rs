//! Configuration schema definitions.
//!
//! This module defines the security settings consulted by the gate and the
//! parameter keys they are read from.

use std::collections::BTreeSet;

use serde::Serialize;

/// File name of the parameters file inside the configuration directory.
pub const PARAMETERS_FILE: &str = "parameters.yml";

/// Alternative file names accepted by the filesystem locator, in lookup order.
pub const PARAMETERS_FILE_ALTERNATIVES: &[&str] = &["parameters.yaml", "parameters.toml"];

/// Top-level mapping holding the gate keys.
pub const PARAMETERS_KEY: &str = "parameters";

pub const KEY_SECURITY_DISABLE: &str = "app_dev_security_disable";
pub const KEY_ALLOW_HTTP_CLIENT_IP: &str = "app_dev_security_allow_http_client_ip";
pub const KEY_ALLOW_HTTP_X_FORWARDED_FOR: &str = "app_dev_security_allow_http_x_forwarded_for";
pub const KEY_DISALLOWED_SAPI_NAMES: &str = "app_dev_security_disallowed_php_sapi_names";
pub const KEY_ALLOWED_REMOTE_ADDR: &str = "app_dev_security_allowed_remote_addr";

/// Security settings for the debug entry point.
///
/// Built once by the loader and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Bypass every check.
    pub security_disabled: bool,

    /// Accept requests carrying a `Client-IP` header.
    pub allow_http_client_ip: bool,

    /// Accept requests carrying an `X-Forwarded-For` header.
    pub allow_http_x_forwarded_for: bool,

    /// Execution modes that are always rejected.
    pub disallowed_sapi_names: BTreeSet<String>,

    /// Caller addresses allowed to reach the entry point.
    pub allowed_remote_addrs: BTreeSet<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            security_disabled: false,
            allow_http_client_ip: false,
            allow_http_x_forwarded_for: false,
            disallowed_sapi_names: default_disallowed_sapi_names(),
            allowed_remote_addrs: default_allowed_remote_addrs(),
        }
    }
}

impl Settings {
    /// Settings with every check bypassed.
    pub fn disabled() -> Self {
        Self {
            security_disabled: true,
            ..Self::default()
        }
    }
}

fn default_disallowed_sapi_names() -> BTreeSet<String> {
    ["cli-server"].into_iter().map(String::from).collect()
}

fn default_allowed_remote_addrs() -> BTreeSet<String> {
    ["127.0.0.1", "fe80::1", "::1"]
        .into_iter()
        .map(String::from)
        .collect()
}
