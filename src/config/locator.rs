//! Locating configuration files on disk.

use std::path::{Path, PathBuf};

use crate::config::loader::ConfigError;
use crate::config::schema::PARAMETERS_FILE_ALTERNATIVES;

/// Resolves a configuration file name against a list of directories.
pub trait FileLocator: Send + Sync {
    /// Return the path of the first match, or `ConfigError::NotFound`.
    fn locate(&self, file: &str, dirs: &[PathBuf]) -> Result<PathBuf, ConfigError>;
}

/// Locator backed by the local filesystem.
///
/// For each directory the requested name is tried first, then the accepted
/// alternatives (`parameters.yaml`, `parameters.toml`).
#[derive(Debug, Clone)]
pub struct FsLocator {
    alternatives: Vec<String>,
}

impl FsLocator {
    pub fn new() -> Self {
        Self {
            alternatives: PARAMETERS_FILE_ALTERNATIVES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Locator that only accepts the exact file name.
    pub fn exact() -> Self {
        Self {
            alternatives: Vec::new(),
        }
    }

    fn candidates<'a>(&'a self, file: &'a str) -> impl Iterator<Item = &'a str> {
        std::iter::once(file).chain(self.alternatives.iter().map(String::as_str))
    }
}

impl Default for FsLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl FileLocator for FsLocator {
    fn locate(&self, file: &str, dirs: &[PathBuf]) -> Result<PathBuf, ConfigError> {
        for dir in dirs {
            for name in self.candidates(file) {
                let path = dir.join(name);
                if path.is_file() {
                    return Ok(path);
                }
            }
        }

        Err(ConfigError::NotFound {
            file: file.to_string(),
            dirs: dirs.to_vec(),
        })
    }
}

/// `true` if the path names a TOML file.
pub(crate) fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}
