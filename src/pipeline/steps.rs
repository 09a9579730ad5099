//! Step implementations and the command lines they run.

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

use super::{Options, RunReport, Step, StepError, StepStatus};
use crate::artifact::{find_archives, find_packages, relocate};
use crate::common::ensure_dir_exists;
use crate::config::{Config, Interpreter};
use crate::process::{self, Cmd};

type StepResult = Result<(StepStatus, Option<String>), StepError>;

/// Values earlier steps hand to later ones.
#[derive(Debug, Default)]
pub(super) struct Resolved {
    pub interpreter: Option<Interpreter>,
}

fn with_interpreter(cmd: Cmd, interp: Option<&Interpreter>) -> Cmd {
    match interp {
        Some(i) => cmd.env(&i.var, i.path.to_string_lossy()),
        None => cmd,
    }
}

/// `<autogen> --system`
///
/// A relative generator path is anchored to the working directory.
pub fn scaffold_cmd(cfg: &Config, interp: Option<&Interpreter>) -> Cmd {
    let program = if cfg.autogen.contains('/') && !Path::new(&cfg.autogen).is_absolute() {
        cfg.work_dir
            .join(cfg.autogen.trim_start_matches("./"))
            .to_string_lossy()
            .into_owned()
    } else {
        cfg.autogen.clone()
    };
    let cmd = Cmd::new(program).arg("--system").dir(&cfg.work_dir);
    with_interpreter(cmd, interp)
}

/// `<make> dist`
pub fn dist_cmd(cfg: &Config, interp: Option<&Interpreter>) -> Cmd {
    let cmd = Cmd::new(&cfg.make).arg("dist").dir(&cfg.work_dir);
    with_interpreter(cmd, interp)
}

/// The builddep resolver invocation for the spec file.
///
/// `BUILDDEP_TOOL` is split on whitespace and used verbatim. Otherwise
/// `dnf builddep -y` when dnf is installed, else `yum-builddep -y`.
pub fn builddep_cmd(cfg: &Config, interp: Option<&Interpreter>) -> Result<Cmd> {
    let cmd = match &cfg.builddep {
        Some(line) => {
            let mut parts = line.split_whitespace();
            let Some(program) = parts.next() else {
                bail!("BUILDDEP_TOOL is blank");
            };
            Cmd::new(program).args(parts)
        }
        None if process::exists("dnf") => Cmd::new("dnf").args(["builddep", "-y"]),
        None if process::exists("yum-builddep") => Cmd::new("yum-builddep").arg("-y"),
        None => bail!(
            "No builddep resolver found. Install dnf-plugins-core (dnf builddep) or yum-utils (yum-builddep), or set BUILDDEP_TOOL"
        ),
    };
    let cmd = cmd.arg_path(&cfg.spec_file).dir(&cfg.work_dir);
    Ok(with_interpreter(cmd, interp))
}

/// `<rpmbuild> -D "_topdir <topdir>" -ta`; archives are appended by the caller.
pub fn rpmbuild_cmd(cfg: &Config, topdir: &Path, interp: Option<&Interpreter>) -> Cmd {
    let cmd = Cmd::new(&cfg.rpmbuild)
        .arg("-D")
        .arg(format!("_topdir {}", topdir.display()))
        .arg("-ta")
        .dir(&cfg.work_dir);
    with_interpreter(cmd, interp)
}

/// Run an external tool as `step`. Non-zero exit fails the step.
pub(super) fn run_tool(step: Step, cmd: Cmd, opts: &Options) -> StepResult {
    println!("  $ {}", cmd.display());
    let program = cmd.program().to_string();

    if opts.capture_output {
        let result = cmd
            .run()
            .map_err(|e| StepError::from_anyhow(step, e))?;
        if !result.success() {
            return Err(StepError::tool(
                step,
                &program,
                result.status.code(),
                Some(result.diagnostic().to_string()),
            ));
        }
    } else {
        let status = cmd
            .run_interactive()
            .map_err(|e| StepError::from_anyhow(step, e))?;
        if !status.success() {
            return Err(StepError::tool(step, &program, status.code(), None));
        }
    }

    Ok((StepStatus::Ok, None))
}

pub(super) fn ensure_dirs(cfg: &Config, report: &mut RunReport) -> StepResult {
    for dir in [&cfg.export_dir, &cfg.scratch_dir] {
        let created =
            ensure_dir_exists(dir).map_err(|e| StepError::from_anyhow(Step::EnsureDirs, e))?;
        if created {
            println!("  Created {}", dir.display());
            report.created_dirs.push(dir.clone());
        } else {
            println!("  Exists  {}", dir.display());
        }
    }
    Ok((StepStatus::Ok, None))
}

pub(super) fn configure_env(cfg: &Config, resolved: &mut Resolved) -> StepResult {
    match cfg.resolve_interpreter() {
        Some(interp) => {
            let detail = format!("{}={}", interp.var, interp.path.display());
            println!("  {}", detail);
            resolved.interpreter = Some(interp);
            Ok((StepStatus::Ok, Some(detail)))
        }
        None => {
            println!(
                "  {} not found, leaving {} unset",
                cfg.interpreter_candidate.display(),
                cfg.interpreter_var
            );
            Ok((StepStatus::Skipped, None))
        }
    }
}

pub(super) fn build_packages(cfg: &Config, resolved: &Resolved, opts: &Options) -> StepResult {
    let step = Step::BuildPackages;

    let archives =
        find_archives(&cfg.work_dir, &cfg.project).map_err(|e| StepError::from_anyhow(step, e))?;
    if archives.is_empty() {
        return Err(StepError::new(
            step,
            format!(
                "no archives matching {} in {}",
                cfg.archive_glob(),
                cfg.work_dir.display()
            ),
        ));
    }

    // _topdir must be absolute.
    let topdir = fs::canonicalize(&cfg.scratch_dir).map_err(|e| {
        StepError::new(
            step,
            format!("cannot resolve {}: {}", cfg.scratch_dir.display(), e),
        )
    })?;

    let mut cmd = rpmbuild_cmd(cfg, &topdir, resolved.interpreter.as_ref());
    for archive in &archives {
        cmd = cmd.arg_path(archive);
    }
    run_tool(step, cmd, opts)?;

    Ok((StepStatus::Ok, Some(format!("{} archive(s)", archives.len()))))
}

pub(super) fn relocate_artifacts(cfg: &Config, report: &mut RunReport) -> StepResult {
    let step = Step::RelocateArtifacts;
    let fail = |e| StepError::from_anyhow(step, e);

    let archives = find_archives(&cfg.work_dir, &cfg.project).map_err(fail)?;
    report.archives = relocate(&archives, &cfg.export_dir).map_err(fail)?;

    let packages = find_packages(&cfg.scratch_dir, &cfg.package_suffix).map_err(fail)?;
    report.packages = relocate(&packages, &cfg.export_dir).map_err(fail)?;

    for path in report.exported() {
        println!("  -> {}", path.display());
    }

    Ok((
        StepStatus::Ok,
        Some(format!(
            "{} archive(s), {} package(s)",
            report.archives.len(),
            report.packages.len()
        )),
    ))
}
