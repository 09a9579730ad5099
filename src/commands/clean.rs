//! Clean command - removes scratch and export directories.

use anyhow::Result;
use std::path::Path;

use crate::common::remove_dir_if_exists;
use crate::config::Config;

/// Clean target for the clean command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanTarget {
    /// rpmbuild topdir only (default)
    Scratch,
    /// Exported artifacts only
    Exported,
    /// Both
    All,
}

/// Execute the clean command.
pub fn cmd_clean(config: &Config, target: CleanTarget) -> Result<()> {
    match target {
        CleanTarget::Scratch => clean_dir("scratch dir", &config.scratch_dir),
        CleanTarget::Exported => clean_dir("export dir", &config.export_dir),
        CleanTarget::All => {
            clean_dir("scratch dir", &config.scratch_dir)?;
            clean_dir("export dir", &config.export_dir)
        }
    }
}

fn clean_dir(label: &str, dir: &Path) -> Result<()> {
    if remove_dir_if_exists(dir)? {
        println!("Removed {} ({}).", label, dir.display());
    } else {
        println!("No {} to clean.", label);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_clean_scratch_keeps_exports() {
        let temp = TempDir::new().unwrap();
        let cfg = Config::from_vars(temp.path(), &HashMap::new());
        fs::create_dir_all(cfg.scratch_dir.join("RPMS/noarch")).unwrap();
        fs::create_dir_all(&cfg.export_dir).unwrap();
        fs::write(cfg.export_dir.join("foo-1.0.tar.gz"), b"x").unwrap();

        cmd_clean(&cfg, CleanTarget::Scratch).unwrap();

        assert!(!cfg.scratch_dir.exists());
        assert!(cfg.export_dir.join("foo-1.0.tar.gz").exists());
    }

    #[test]
    fn test_clean_all_when_nothing_exists() {
        let temp = TempDir::new().unwrap();
        let cfg = Config::from_vars(temp.path(), &HashMap::new());
        cmd_clean(&cfg, CleanTarget::All).unwrap();
        assert!(!cfg.export_dir.exists());
    }
}
