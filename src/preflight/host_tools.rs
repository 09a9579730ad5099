//! Host tool availability checks.

use std::path::PathBuf;

use crate::config::{is_executable, Config};
use crate::process;

use super::types::CheckResult;

/// Check the tools every pipeline step shells out to.
pub fn check_host_tools(config: &Config, skip_builddep: bool) -> Vec<CheckResult> {
    let mut results = Vec::new();

    results.push(check_program(
        &config.autogen,
        config,
        "Scaffold generator missing. Run from a source checkout or set RELBUILD_AUTOGEN.",
    ));
    results.push(check_program(
        &config.make,
        config,
        "Install 'make' package. Required for `make dist`",
    ));
    results.push(check_program(
        &config.rpmbuild,
        config,
        "Install 'rpm-build' package. Required to build packages",
    ));

    results.push(check_builddep(config, skip_builddep));

    results
}

/// Resolve a program the way `Command` will: names with a `/` are paths
/// (relative to the working directory), bare names are looked up in PATH.
fn locate(program: &str, config: &Config) -> Option<PathBuf> {
    if program.contains('/') {
        let path = config.work_dir.join(program);
        is_executable(&path).then_some(path)
    } else {
        process::which(program)
    }
}

fn check_program(program: &str, config: &Config, hint: &str) -> CheckResult {
    match locate(program, config) {
        Some(path) => CheckResult::pass_with(program, &path.display().to_string()),
        None => CheckResult::fail(program, &format!("Not found. {}", hint)),
    }
}

fn check_builddep(config: &Config, skip_builddep: bool) -> CheckResult {
    const NAME: &str = "builddep resolver";

    if skip_builddep {
        return CheckResult::skip(NAME, "--skip-builddep");
    }

    if let Some(line) = &config.builddep {
        let program = line.split_whitespace().next().unwrap_or("");
        return match locate(program, config) {
            Some(path) => CheckResult::pass_with(NAME, &format!("{} ({})", line, path.display())),
            None => CheckResult::fail(NAME, &format!("BUILDDEP_TOOL '{}' not found", line)),
        };
    }

    if let Some(path) = process::which("dnf") {
        CheckResult::pass_with(NAME, &format!("dnf builddep ({})", path.display()))
    } else if let Some(path) = process::which("yum-builddep") {
        CheckResult::pass_with(NAME, &path.display().to_string())
    } else {
        CheckResult::warn(
            NAME,
            "Neither dnf nor yum-builddep found. Install dnf-plugins-core or yum-utils, or build with --skip-builddep",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preflight::CheckStatus;
    use std::collections::HashMap;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn config(dir: &std::path::Path) -> Config {
        Config::from_vars(dir, &HashMap::new())
    }

    #[test]
    fn test_relative_autogen_resolved_in_work_dir() {
        let temp = TempDir::new().unwrap();
        let cfg = config(temp.path());
        assert_eq!(
            check_program(&cfg.autogen, &cfg, "hint").status,
            CheckStatus::Fail
        );

        let script = temp.path().join("autogen.sh");
        fs::write(&script, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(
            check_program(&cfg.autogen, &cfg, "hint").status,
            CheckStatus::Pass
        );
    }

    #[test]
    fn test_path_lookup() {
        let temp = TempDir::new().unwrap();
        let cfg = config(temp.path());
        assert_eq!(check_program("sh", &cfg, "hint").status, CheckStatus::Pass);
        assert_eq!(
            check_program("nonexistent_program_12345", &cfg, "hint").status,
            CheckStatus::Fail
        );
    }

    #[test]
    fn test_builddep_skipped() {
        let temp = TempDir::new().unwrap();
        let cfg = config(temp.path());
        assert_eq!(check_builddep(&cfg, true).status, CheckStatus::Skip);
    }

    #[test]
    fn test_builddep_override_checked() {
        let temp = TempDir::new().unwrap();
        let mut cfg = config(temp.path());
        cfg.builddep = Some("true --flag".to_string());
        assert_eq!(check_builddep(&cfg, false).status, CheckStatus::Pass);

        cfg.builddep = Some("nonexistent_program_12345".to_string());
        assert_eq!(check_builddep(&cfg, false).status, CheckStatus::Fail);
    }
}
