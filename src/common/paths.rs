//! Utilities for directory management.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Ensure a directory exists, creating it and any missing parents.
///
/// Returns `true` if the directory was created, `false` if it was already
/// there. An existing directory is left untouched. A non-directory at `path`
/// is an error.
pub fn ensure_dir_exists(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    if path.exists() {
        bail!("{} exists but is not a directory", path.display());
    }
    fs::create_dir_all(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(true)
}

/// Remove a directory tree. Returns `false` if there was nothing to remove.
pub fn remove_dir_if_exists(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    Ok(true)
}
