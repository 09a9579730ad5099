//! Preflight command - runs preflight checks.

use anyhow::Result;

use crate::config::Config;
use crate::preflight;

/// Execute the preflight command.
pub fn cmd_preflight(config: &Config, strict: bool, skip_builddep: bool) -> Result<()> {
    if strict {
        preflight::run_preflight_or_fail(config, skip_builddep)?;
    } else {
        let report = preflight::run_preflight(config, skip_builddep);
        report.print();
        if !report.all_passed() {
            println!("Some checks failed. Use --strict to fail the build.");
        }
    }
    Ok(())
}
