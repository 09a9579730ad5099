//! Moving artifacts into the export directory.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Move each path into `dest_dir`, flattened to its file name.
///
/// A file of the same name already in `dest_dir` is replaced. Stops at the
/// first failure; files moved before it stay moved. Returns destination paths
/// in input order.
pub fn relocate(paths: &[PathBuf], dest_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut moved = Vec::with_capacity(paths.len());
    for src in paths {
        let Some(name) = src.file_name() else {
            bail!("Cannot relocate {}: no file name", src.display());
        };
        let dest = dest_dir.join(name);
        move_file(src, &dest)?;
        moved.push(dest);
    }
    Ok(moved)
}

/// Move one file, falling back to copy + remove across filesystems.
pub fn move_file(src: &Path, dest: &Path) -> Result<()> {
    if fs::rename(src, dest).is_ok() {
        return Ok(());
    }

    fs::copy(src, dest).with_context(|| {
        format!("Failed to move {} to {}", src.display(), dest.display())
    })?;
    fs::remove_file(src)
        .with_context(|| format!("Failed to remove {} after copy", src.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_relocate_flattens_nested_paths() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("tmp.repos/RPMS/noarch");
        let dest = temp.path().join("out");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dest).unwrap();
        let rpm = src.join("foo-1.0-1.noarch.rpm");
        fs::write(&rpm, b"pkg").unwrap();

        let moved = relocate(&[rpm.clone()], &dest).unwrap();

        assert_eq!(moved, vec![dest.join("foo-1.0-1.noarch.rpm")]);
        assert!(!rpm.exists());
        assert_eq!(fs::read(&moved[0]).unwrap(), b"pkg");
    }

    #[test]
    fn test_relocate_replaces_existing() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("foo-1.0.tar.gz"), b"old").unwrap();
        let src = temp.path().join("foo-1.0.tar.gz");
        fs::write(&src, b"new").unwrap();

        relocate(&[src], &dest).unwrap();

        assert_eq!(fs::read(dest.join("foo-1.0.tar.gz")).unwrap(), b"new");
    }

    #[test]
    fn test_relocate_stops_at_first_failure() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out");
        fs::create_dir_all(&dest).unwrap();
        let first = temp.path().join("a.rpm");
        fs::write(&first, b"a").unwrap();
        let missing = temp.path().join("missing.rpm");
        let third = temp.path().join("c.rpm");
        fs::write(&third, b"c").unwrap();

        let err = relocate(&[first, missing, third.clone()], &dest);

        assert!(err.is_err());
        assert!(dest.join("a.rpm").exists());
        assert!(third.exists());
        assert!(!dest.join("c.rpm").exists());
    }

    #[test]
    fn test_relocate_nothing_is_ok() {
        let temp = TempDir::new().unwrap();
        assert!(relocate(&[], temp.path()).unwrap().is_empty());
    }
}
