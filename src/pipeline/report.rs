//! Run report: what each step did.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use super::Step;
use crate::config::Interpreter;
use crate::timing::format_duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Ok,
    Skipped,
}

/// Outcome of one completed step.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub step: Step,
    pub status: StepStatus,
    pub duration_ms: u128,
    pub detail: Option<String>,
}

/// Everything a successful run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub steps: Vec<StepOutcome>,
    pub interpreter: Option<Interpreter>,
    /// Directories that did not exist before the run.
    pub created_dirs: Vec<PathBuf>,
    /// Archives moved into the export dir (destination paths).
    pub archives: Vec<PathBuf>,
    /// Packages moved into the export dir (destination paths).
    pub packages: Vec<PathBuf>,
}

impl RunReport {
    pub(crate) fn record(
        &mut self,
        step: Step,
        status: StepStatus,
        elapsed: Duration,
        detail: Option<String>,
    ) {
        self.steps.push(StepOutcome {
            step,
            status,
            duration_ms: elapsed.as_millis(),
            detail,
        });
    }

    /// Status of `step`, if it ran.
    pub fn status_of(&self, step: Step) -> Option<StepStatus> {
        self.steps.iter().find(|o| o.step == step).map(|o| o.status)
    }

    /// All relocated artifacts, archives first.
    pub fn exported(&self) -> impl Iterator<Item = &PathBuf> {
        self.archives.iter().chain(self.packages.iter())
    }

    /// Print a human-readable summary to stdout.
    pub fn print(&self) {
        println!("=== Build Summary ===\n");
        for outcome in &self.steps {
            let status = match outcome.status {
                StepStatus::Ok => "OK",
                StepStatus::Skipped => "SKIP",
            };
            let elapsed = format_duration(Duration::from_millis(outcome.duration_ms as u64));
            print!("  [{}] {:<28} {:>7}", status, outcome.step.name(), elapsed);
            match &outcome.detail {
                Some(detail) => println!("  {}", detail),
                None => println!(),
            }
        }

        println!();
        println!("Exported artifacts:");
        let mut any = false;
        for path in self.exported() {
            any = true;
            println!("  {}", path.display());
        }
        if !any {
            println!("  (none)");
        }
    }
}
