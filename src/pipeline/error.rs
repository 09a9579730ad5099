//! The single pipeline failure kind: a step failed.

use thiserror::Error;

use super::Step;

/// A pipeline step failed. Carries the step and the tool's diagnostic.
#[derive(Debug, Error)]
#[error(
    "step '{step}' failed: {message}{}",
    .output.as_deref().map(|o| format!(":\n{}", o)).unwrap_or_default()
)]
pub struct StepError {
    pub step: Step,
    pub message: String,
    /// Exit code of the external tool, if one ran and exited normally.
    pub exit_code: Option<i32>,
    /// Captured diagnostic output (stderr, falling back to stdout).
    pub output: Option<String>,
}

impl StepError {
    /// Failure not tied to an external tool's exit status.
    pub fn new(step: Step, message: impl Into<String>) -> Self {
        Self {
            step,
            message: message.into(),
            exit_code: None,
            output: None,
        }
    }

    /// An external tool exited non-zero.
    pub fn tool(step: Step, program: &str, exit_code: Option<i32>, output: Option<String>) -> Self {
        let message = match exit_code {
            Some(code) => format!("'{}' exited with code {}", program, code),
            None => format!("'{}' was terminated by a signal", program),
        };
        Self {
            step,
            message,
            exit_code,
            output: output.filter(|o| !o.is_empty()),
        }
    }

    /// Wrap a helper error, keeping its context chain in the message.
    pub fn from_anyhow(step: Step, err: anyhow::Error) -> Self {
        Self::new(step, format!("{:#}", err))
    }
}
