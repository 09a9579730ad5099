//! Preflight check results and the report printed before a release build.

/// Outcome of one host or input check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    /// The pipeline would stop at the step that needs this.
    Fail,
    /// The build can run, but something is off (e.g. no interpreter override).
    Warn,
    /// Not checked, e.g. the builddep resolver under `--skip-builddep`.
    Skip,
}

impl CheckStatus {
    pub fn label(self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Warn => "WARN",
            CheckStatus::Skip => "SKIP",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            CheckStatus::Pass => "✓",
            CheckStatus::Fail => "✗",
            CheckStatus::Warn => "⚠",
            CheckStatus::Skip => "○",
        }
    }
}

/// A named check and what it found.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub details: String,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, details: &str) -> Self {
        Self {
            name: name.to_string(),
            status,
            details: details.to_string(),
        }
    }

    pub fn pass_with(name: &str, details: &str) -> Self {
        Self::new(name, CheckStatus::Pass, details)
    }

    pub fn fail(name: &str, details: &str) -> Self {
        Self::new(name, CheckStatus::Fail, details)
    }

    pub fn warn(name: &str, details: &str) -> Self {
        Self::new(name, CheckStatus::Warn, details)
    }

    pub fn skip(name: &str, details: &str) -> Self {
        Self::new(name, CheckStatus::Skip, details)
    }
}

/// Every check run by `relbuild preflight`, in the order they ran.
pub struct PreflightReport {
    pub checks: Vec<CheckResult>,
}

impl PreflightReport {
    /// True when nothing would stop the pipeline. Warnings and skips don't.
    pub fn all_passed(&self) -> bool {
        self.fail_count() == 0
    }

    /// Number of checks with the given status.
    pub fn count(&self, status: CheckStatus) -> usize {
        self.checks.iter().filter(|c| c.status == status).count()
    }

    pub fn fail_count(&self) -> usize {
        self.count(CheckStatus::Fail)
    }

    pub fn warn_count(&self) -> usize {
        self.count(CheckStatus::Warn)
    }

    pub fn skip_count(&self) -> usize {
        self.count(CheckStatus::Skip)
    }

    /// Names of the failed checks.
    pub fn failures(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| c.status == CheckStatus::Fail)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Look up a check by name.
    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// The count lines printed under the check rows.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Summary: {}/{} passed",
            self.count(CheckStatus::Pass),
            self.checks.len()
        )];
        if self.fail_count() > 0 {
            lines.push(format!(
                "         {} FAILED ({}) - the release build will not succeed",
                self.fail_count(),
                self.failures().join(", ")
            ));
        }
        if self.warn_count() > 0 {
            lines.push(format!("         {} warning(s)", self.warn_count()));
        }
        if self.skip_count() > 0 {
            lines.push(format!("         {} skipped", self.skip_count()));
        }
        lines
    }

    pub fn print(&self) {
        println!("=== Preflight Check Results ===\n");

        for check in &self.checks {
            println!(
                "  {} [{}] {}: {}",
                check.status.icon(),
                check.status.label(),
                check.name,
                check.details
            );
        }

        println!();
        for line in self.summary_lines() {
            println!("{}", line);
        }
    }
}
