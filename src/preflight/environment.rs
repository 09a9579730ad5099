//! Build input and output directory checks.

use std::fs;
use std::path::Path;

use crate::config::Config;

use super::types::CheckResult;

/// Check the spec file, the interpreter and the two output directories.
pub fn check_build_environment(config: &Config) -> Vec<CheckResult> {
    let mut results = Vec::new();

    if config.spec_file.is_file() {
        results.push(CheckResult::pass_with(
            "spec file",
            &config.spec_file.display().to_string(),
        ));
    } else {
        results.push(CheckResult::fail(
            "spec file",
            &format!(
                "{} not found. Set RELBUILD_SPEC_FILE or run from the project root",
                config.spec_file.display()
            ),
        ));
    }

    match config.resolve_interpreter() {
        Some(interp) => results.push(CheckResult::pass_with(
            &interp.var,
            &interp.path.display().to_string(),
        )),
        None => results.push(CheckResult::warn(
            &config.interpreter_var,
            &format!(
                "{} not found - configure will pick its own interpreter",
                config.interpreter_candidate.display()
            ),
        )),
    }

    results.push(check_dir_writable("export dir", &config.export_dir));
    results.push(check_dir_writable("scratch dir", &config.scratch_dir));

    results
}

/// An existing dir must accept a file; a missing one needs a dir ancestor.
fn check_dir_writable(name: &str, dir: &Path) -> CheckResult {
    if dir.is_dir() {
        let marker = dir.join(".preflight-test");
        return match fs::write(&marker, "test") {
            Ok(()) => {
                let _ = fs::remove_file(&marker);
                CheckResult::pass_with(name, &format!("{} writable", dir.display()))
            }
            Err(e) => CheckResult::fail(name, &format!("Cannot write to {}: {}", dir.display(), e)),
        };
    }

    if dir.exists() {
        return CheckResult::fail(
            name,
            &format!("{} exists but is not a directory", dir.display()),
        );
    }

    let ancestor = dir.ancestors().skip(1).find(|p| p.exists());
    match ancestor {
        Some(p) if p.is_dir() => CheckResult::pass_with(
            name,
            &format!("{} will be created", dir.display()),
        ),
        Some(p) => CheckResult::fail(
            name,
            &format!("Cannot create {}: {} is not a directory", dir.display(), p.display()),
        ),
        None => CheckResult::fail(name, &format!("Cannot create {}", dir.display())),
    }
}
