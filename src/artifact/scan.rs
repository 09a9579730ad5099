//! Directory scans for dist archives and package files.

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ARCHIVE_SUFFIX;

/// True if `name` matches `<project>-*.tar.gz`.
///
/// The `*` may be empty, as with a shell glob. Names are compared as raw
/// bytes, so a non-UTF-8 version part still matches.
pub fn is_archive_name(name: impl AsRef<OsStr>, project: &str) -> bool {
    let name = name.as_ref().as_encoded_bytes();
    let suffix = ARCHIVE_SUFFIX.as_bytes();
    name.len() > project.len() + suffix.len()
        && name.starts_with(project.as_bytes())
        && name[project.len()] == b'-'
        && name.ends_with(suffix)
}

/// True if `name` ends with `suffix`, ignoring ASCII case.
pub fn is_package_name(name: impl AsRef<OsStr>, suffix: &str) -> bool {
    let name = name.as_ref().as_encoded_bytes();
    name.len() >= suffix.len()
        && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
}

/// Find archives for `project` directly inside `dir` (not recursive).
///
/// Hidden files are skipped, as the shell glob would. A symlink counts when
/// it points at a regular file. Results are sorted.
pub fn find_archives(dir: &Path, project: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let name = entry.file_name();
        if name.as_encoded_bytes().starts_with(b".") || !is_archive_name(&name, project) {
            continue;
        }
        let path = entry.path();
        // Dangling links are not archives.
        if fs::metadata(&path).is_ok_and(|meta| meta.is_file()) {
            found.push(path);
        }
    }

    found.sort();
    Ok(found)
}

/// Find every regular file under `root` whose name ends with `suffix`.
///
/// Any nesting depth. Symlinks are not followed. Results are sorted.
pub fn find_packages(root: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("Failed to scan {}", root.display()))?;
        if entry.file_type().is_file() && is_package_name(entry.file_name(), suffix) {
            found.push(entry.into_path());
        }
    }

    found.sort();
    Ok(found)
}
