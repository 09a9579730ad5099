//! Configuration management for relbuild.
//!
//! Reads configuration from a `.env` file in the working directory and from
//! environment variables. Environment variables take precedence over `.env`.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Default project name; archives are `<project>-*.tar.gz`.
pub const DEFAULT_PROJECT: &str = "ovirt-hosted-engine-ha";
/// Default export directory (relative to the working directory).
pub const DEFAULT_EXPORT_DIR: &str = "exported-artifacts";
/// Default rpmbuild topdir (relative to the working directory).
pub const DEFAULT_SCRATCH_DIR: &str = "tmp.repos";
/// Interpreter pinned for configure when present.
pub const DEFAULT_INTERPRETER: &str = "/usr/bin/python3";
/// Variable the interpreter path is passed as.
pub const DEFAULT_INTERPRETER_VAR: &str = "PYTHON";
/// Suffix of package files collected from the scratch tree.
pub const PACKAGE_SUFFIX: &str = ".rpm";
/// Suffix of distribution archives.
pub const ARCHIVE_SUFFIX: &str = ".tar.gz";

/// Relbuild configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Project name (archive prefix and default spec file stem)
    pub project: String,
    /// Directory every step runs in
    pub work_dir: PathBuf,
    /// Final artifact destination (default: exported-artifacts)
    pub export_dir: PathBuf,
    /// rpmbuild topdir (default: tmp.repos)
    pub scratch_dir: PathBuf,
    /// Spec file handed to the builddep resolver
    pub spec_file: PathBuf,
    /// Interpreter used when it exists (default: /usr/bin/python3)
    pub interpreter_candidate: PathBuf,
    /// Variable name the interpreter is passed as (default: PYTHON)
    pub interpreter_var: String,
    /// Scaffold generator (default: ./autogen.sh)
    pub autogen: String,
    /// Make program (default: make)
    pub make: String,
    /// Packaging tool (default: rpmbuild)
    pub rpmbuild: String,
    /// Explicit builddep command line; auto-detected when unset
    pub builddep: Option<String>,
    /// Package file suffix, matched case-insensitively
    pub package_suffix: String,
}

/// Interpreter override resolved for child processes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interpreter {
    pub var: String,
    pub path: PathBuf,
}

impl Config {
    /// Load configuration for `work_dir` from `.env` and the environment.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let mut vars = HashMap::new();

        let env_path = work_dir.join(".env");
        if env_path.exists() {
            let iter = dotenvy::from_path_iter(&env_path)
                .with_context(|| format!("Failed to read {}", env_path.display()))?;
            for item in iter {
                let (key, value) =
                    item.with_context(|| format!("Malformed line in {}", env_path.display()))?;
                vars.insert(key, value);
            }
        }

        // Environment variables override .env file
        for (key, value) in std::env::vars() {
            vars.insert(key, value);
        }

        Ok(Self::from_vars(work_dir, &vars))
    }

    /// Build a config from an explicit variable map, applying defaults.
    pub fn from_vars(work_dir: &Path, vars: &HashMap<String, String>) -> Self {
        let get = |key: &str| vars.get(key).filter(|v| !v.is_empty()).cloned();
        let path = |key: &str, default: &str| {
            let p = PathBuf::from(get(key).unwrap_or_else(|| default.to_string()));
            if p.is_absolute() {
                p
            } else {
                work_dir.join(p)
            }
        };

        let project = get("RELBUILD_PROJECT").unwrap_or_else(|| DEFAULT_PROJECT.to_string());
        let spec_default = format!("{}.spec", project);

        Self {
            work_dir: work_dir.to_path_buf(),
            export_dir: path("RELBUILD_EXPORT_DIR", DEFAULT_EXPORT_DIR),
            scratch_dir: path("RELBUILD_SCRATCH_DIR", DEFAULT_SCRATCH_DIR),
            spec_file: path("RELBUILD_SPEC_FILE", &spec_default),
            interpreter_candidate: PathBuf::from(
                get("RELBUILD_INTERPRETER").unwrap_or_else(|| DEFAULT_INTERPRETER.to_string()),
            ),
            interpreter_var: get("RELBUILD_INTERPRETER_VAR")
                .unwrap_or_else(|| DEFAULT_INTERPRETER_VAR.to_string()),
            autogen: get("RELBUILD_AUTOGEN").unwrap_or_else(|| "./autogen.sh".to_string()),
            make: get("RELBUILD_MAKE").unwrap_or_else(|| "make".to_string()),
            rpmbuild: get("RELBUILD_RPMBUILD").unwrap_or_else(|| "rpmbuild".to_string()),
            builddep: get("BUILDDEP_TOOL"),
            package_suffix: PACKAGE_SUFFIX.to_string(),
            project,
        }
    }

    /// `<project>-*.tar.gz`, for display.
    pub fn archive_glob(&self) -> String {
        format!("{}-*{}", self.project, ARCHIVE_SUFFIX)
    }

    /// Resolve the interpreter override.
    ///
    /// Returns `None` when the candidate is missing or not executable; that
    /// is not an error.
    pub fn resolve_interpreter(&self) -> Option<Interpreter> {
        if is_executable(&self.interpreter_candidate) {
            Some(Interpreter {
                var: self.interpreter_var.clone(),
                path: self.interpreter_candidate.clone(),
            })
        } else {
            None
        }
    }

    /// Print configuration for debugging.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  RELBUILD_PROJECT: {}", self.project);
        println!("  Working directory: {}", self.work_dir.display());
        println!("  RELBUILD_EXPORT_DIR: {}", self.export_dir.display());
        println!("  RELBUILD_SCRATCH_DIR: {}", self.scratch_dir.display());
        println!("  RELBUILD_SPEC_FILE: {}", self.spec_file.display());
        println!("  RELBUILD_AUTOGEN: {}", self.autogen);
        println!("  RELBUILD_MAKE: {}", self.make);
        println!("  RELBUILD_RPMBUILD: {}", self.rpmbuild);
        match &self.builddep {
            Some(cmd) => println!("  BUILDDEP_TOOL: {}", cmd),
            None => println!("  BUILDDEP_TOOL: (auto: dnf builddep / yum-builddep)"),
        }
        println!("  Archive pattern: {}", self.archive_glob());
        match self.resolve_interpreter() {
            Some(interp) => println!("  {}: {}", interp.var, interp.path.display()),
            None => println!(
                "  {}: NOT SET ({} not found)",
                self.interpreter_var,
                self.interpreter_candidate.display()
            ),
        }
    }
}

/// True if `path` is a regular file with any execute bit set.
pub fn is_executable(path: &Path) -> bool {
    match path.metadata() {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}
