//! Shared utilities for integration tests.

use std::path::Path;
use tempfile::TempDir;

/// Create a config directory holding `file_name` with `contents`.
pub fn config_dir_with(file_name: &str, contents: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    write_file(dir.path(), file_name, contents);
    dir
}

pub fn write_file(dir: &Path, file_name: &str, contents: &str) {
    std::fs::write(dir.join(file_name), contents).expect("write config file");
}
