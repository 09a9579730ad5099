//! The release pipeline: seven steps, run in order, stopping at the first
//! failure.
//!
//! ```text
//! ensure dirs → configure env → autogen.sh --system → make dist
//!     → builddep <spec> → rpmbuild -ta <archives> → relocate
//! ```
//!
//! Nothing is rolled back on failure. Directories already created and
//! artifacts already moved into the export dir stay where they are.

mod error;
mod report;
mod steps;

pub use error::StepError;
pub use report::{RunReport, StepOutcome, StepStatus};
pub use steps::{builddep_cmd, dist_cmd, rpmbuild_cmd, scaffold_cmd};

use serde::Serialize;
use std::fmt;

use crate::config::Config;
use crate::timing::Timer;

/// Pipeline steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    /// Create the export and scratch directories.
    EnsureDirs,
    /// Resolve the interpreter override.
    ConfigureEnv,
    /// `./autogen.sh --system`
    RegenerateScaffold,
    /// `make dist`
    BuildDist,
    /// `dnf builddep` / `yum-builddep` against the spec file.
    InstallBuildDeps,
    /// `rpmbuild -ta` on every archive.
    BuildPackages,
    /// Move archives and packages into the export dir.
    RelocateArtifacts,
}

impl Step {
    pub const ALL: [Step; 7] = [
        Step::EnsureDirs,
        Step::ConfigureEnv,
        Step::RegenerateScaffold,
        Step::BuildDist,
        Step::InstallBuildDeps,
        Step::BuildPackages,
        Step::RelocateArtifacts,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Step::EnsureDirs => "ensure directories",
            Step::ConfigureEnv => "configure environment",
            Step::RegenerateScaffold => "regenerate build scaffolding",
            Step::BuildDist => "build distribution archive",
            Step::InstallBuildDeps => "install build dependencies",
            Step::BuildPackages => "build packages",
            Step::RelocateArtifacts => "relocate artifacts",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Knobs the CLI exposes on `build`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Mark the builddep step skipped instead of running it.
    pub skip_builddep: bool,
    /// Capture tool output instead of streaming it; attached to errors.
    pub capture_output: bool,
}

/// A step and the command lines it would run.
#[derive(Debug, Clone)]
pub struct PlannedStep {
    pub step: Step,
    pub actions: Vec<String>,
}

/// The release pipeline bound to one configuration.
pub struct Pipeline<'a> {
    config: &'a Config,
    options: Options,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config, options: Options) -> Self {
        Self { config, options }
    }

    /// Run every step in order. Returns at the first failure.
    pub fn run(&self) -> Result<RunReport, StepError> {
        let mut report = RunReport::default();
        let mut resolved = steps::Resolved::default();

        for step in Step::ALL {
            println!("==> {}", step);
            let timer = Timer::start(step.name());
            let (status, detail) = self.run_step(step, &mut resolved, &mut report)?;
            let elapsed = timer.finish();
            report.record(step, status, elapsed, detail);
        }

        report.interpreter = resolved.interpreter;
        Ok(report)
    }

    fn run_step(
        &self,
        step: Step,
        resolved: &mut steps::Resolved,
        report: &mut RunReport,
    ) -> Result<(StepStatus, Option<String>), StepError> {
        let cfg = self.config;
        let opts = &self.options;
        match step {
            Step::EnsureDirs => steps::ensure_dirs(cfg, report),
            Step::ConfigureEnv => steps::configure_env(cfg, resolved),
            Step::RegenerateScaffold => {
                steps::run_tool(step, scaffold_cmd(cfg, resolved.interpreter.as_ref()), opts)
            }
            Step::BuildDist => {
                steps::run_tool(step, dist_cmd(cfg, resolved.interpreter.as_ref()), opts)
            }
            Step::InstallBuildDeps => {
                if opts.skip_builddep {
                    println!("  Skipped (--skip-builddep)");
                    return Ok((StepStatus::Skipped, Some("--skip-builddep".to_string())));
                }
                let cmd = builddep_cmd(cfg, resolved.interpreter.as_ref())
                    .map_err(|e| StepError::from_anyhow(step, e))?;
                steps::run_tool(step, cmd, opts)
            }
            Step::BuildPackages => steps::build_packages(cfg, resolved, opts),
            Step::RelocateArtifacts => steps::relocate_artifacts(cfg, report),
        }
    }

    /// The plan `build --dry-run` prints. Touches nothing.
    pub fn plan(&self) -> Vec<PlannedStep> {
        let cfg = self.config;
        let interp = cfg.resolve_interpreter();
        let interp = interp.as_ref();

        Step::ALL
            .iter()
            .map(|&step| {
                let actions = match step {
                    Step::EnsureDirs => vec![
                        format!("mkdir -p {}", cfg.export_dir.display()),
                        format!("mkdir -p {}", cfg.scratch_dir.display()),
                    ],
                    Step::ConfigureEnv => vec![match interp {
                        Some(i) => format!("{}={}", i.var, i.path.display()),
                        None => format!(
                            "{} not set ({} not found)",
                            cfg.interpreter_var,
                            cfg.interpreter_candidate.display()
                        ),
                    }],
                    Step::RegenerateScaffold => vec![scaffold_cmd(cfg, interp).display()],
                    Step::BuildDist => vec![dist_cmd(cfg, interp).display()],
                    Step::InstallBuildDeps if self.options.skip_builddep => {
                        vec!["(skipped)".to_string()]
                    }
                    Step::InstallBuildDeps => vec![match builddep_cmd(cfg, interp) {
                        Ok(cmd) => cmd.display(),
                        Err(e) => format!("(unresolved: {:#})", e),
                    }],
                    Step::BuildPackages => {
                        let glob = cfg.work_dir.join(cfg.archive_glob());
                        vec![rpmbuild_cmd(cfg, &cfg.scratch_dir, interp)
                            .arg(glob.to_string_lossy())
                            .display()]
                    }
                    Step::RelocateArtifacts => vec![
                        format!(
                            "mv {} {}/",
                            cfg.work_dir.join(cfg.archive_glob()).display(),
                            cfg.export_dir.display()
                        ),
                        format!(
                            "mv {}/**/*{} {}/",
                            cfg.scratch_dir.display(),
                            cfg.package_suffix,
                            cfg.export_dir.display()
                        ),
                    ],
                };
                PlannedStep { step, actions }
            })
            .collect()
    }

    /// Print the dry-run plan.
    pub fn print_plan(&self) {
        println!("=== Build Plan (dry run) ===\n");
        for (i, planned) in self.plan().iter().enumerate() {
            println!("{}. {}", i + 1, planned.step);
            for action in &planned.actions {
                println!("     {}", action);
            }
        }
        println!();
    }
}
