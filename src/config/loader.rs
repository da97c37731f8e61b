//! Configuration loading from disk.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::locator::{is_toml, FileLocator, FsLocator};
use crate::config::schema::{
    Settings, KEY_ALLOWED_REMOTE_ADDR, KEY_ALLOW_HTTP_CLIENT_IP, KEY_ALLOW_HTTP_X_FORWARDED_FOR,
    KEY_DISALLOWED_SAPI_NAMES, KEY_SECURITY_DISABLE, PARAMETERS_FILE, PARAMETERS_KEY,
};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{file} not found in {dirs:?}")]
    NotFound { file: String, dirs: Vec<PathBuf> },

    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load settings from the parameters file in `config_dir`.
///
/// Never fails: a missing, unreadable or malformed file yields
/// [`Settings::default`].
pub fn load(config_dir: &Path) -> Settings {
    load_with(config_dir, &FsLocator::new())
}

/// Same as [`load`], resolving the file through `locator`.
pub fn load_with(config_dir: &Path, locator: &dyn FileLocator) -> Settings {
    match try_load(config_dir, locator) {
        Ok(settings) => settings,
        Err(e @ ConfigError::NotFound { .. }) => {
            debug!(error = %e, "No parameters file, using default gate settings");
            Settings::default()
        }
        Err(e) => {
            warn!(error = %e, "Unusable parameters file, using default gate settings");
            Settings::default()
        }
    }
}

/// Locate, read and parse the parameters file in `config_dir`.
pub fn try_load(config_dir: &Path, locator: &dyn FileLocator) -> Result<Settings, ConfigError> {
    let path = locator.locate(PARAMETERS_FILE, &[config_dir.to_path_buf()])?;
    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let tree = parse_tree(&path, &content)?;

    let settings = settings_from_tree(&tree);
    debug!(path = %path.display(), ?settings, "Gate settings loaded");
    Ok(settings)
}

/// Parse raw file contents into a key/value tree.
///
/// TOML files are read into the same tree shape as YAML.
pub fn parse_tree(path: &Path, content: &str) -> Result<Value, ConfigError> {
    if is_toml(path) {
        Ok(toml::from_str(content)?)
    } else {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Extract settings from a parsed tree.
///
/// Keys are read independently; a missing or ill-shaped value keeps its
/// default. A true `app_dev_security_disable` short-circuits the rest.
pub fn settings_from_tree(tree: &Value) -> Settings {
    let mut settings = Settings::default();

    let Some(params) = tree.get(PARAMETERS_KEY).and_then(Value::as_mapping) else {
        return settings;
    };

    if params
        .get(KEY_SECURITY_DISABLE)
        .and_then(parse_loose_bool)
        .unwrap_or(false)
    {
        settings.security_disabled = true;
        return settings;
    }

    if let Some(allow) = params.get(KEY_ALLOW_HTTP_CLIENT_IP).and_then(parse_loose_bool) {
        settings.allow_http_client_ip = allow;
    }
    if let Some(allow) = params
        .get(KEY_ALLOW_HTTP_X_FORWARDED_FOR)
        .and_then(parse_loose_bool)
    {
        settings.allow_http_x_forwarded_for = allow;
    }
    if let Some(names) = params.get(KEY_DISALLOWED_SAPI_NAMES).and_then(string_set) {
        settings.disallowed_sapi_names = names;
    }
    if let Some(addrs) = params.get(KEY_ALLOWED_REMOTE_ADDR).and_then(string_set) {
        settings.allowed_remote_addrs = addrs;
    }

    settings
}

/// Coerce a configuration scalar to a boolean.
///
/// Accepted literals (trimmed, case-insensitive): `true`, `1`, `yes`, `on`
/// and `false`, `0`, `no`, `off`, the empty string. Numbers are true when
/// non-zero, `null` is false. Anything else is `None`.
pub fn parse_loose_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Null => Some(false),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i != 0)
            } else if let Some(u) = n.as_u64() {
                Some(u != 0)
            } else {
                n.as_f64().map(|f| f != 0.0)
            }
        }
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" | "" => Some(false),
            _ => None,
        },
        Value::Tagged(tagged) => parse_loose_bool(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// A sequence made only of strings, as a set.
fn string_set(value: &Value) -> Option<BTreeSet<String>> {
    value
        .as_sequence()?
        .iter()
        .map(|item| item.as_str().map(String::from))
        .collect()
}
