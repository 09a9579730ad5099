//! Build command - runs the release pipeline.

use anyhow::{Context, Result};
use std::time::Instant;

use crate::config::Config;
use crate::pipeline::{Options, Pipeline};
use crate::preflight;
use crate::timing::format_duration;

/// Flags accepted by `relbuild build`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildArgs {
    /// Print the plan and exit.
    pub dry_run: bool,
    /// Run strict preflight first.
    pub preflight: bool,
    pub skip_builddep: bool,
    /// Capture tool output instead of streaming it.
    pub quiet: bool,
    /// Print the run report as JSON.
    pub json: bool,
}

/// Execute the build command.
pub fn cmd_build(config: &Config, args: BuildArgs) -> Result<()> {
    let pipeline = Pipeline::new(
        config,
        Options {
            skip_builddep: args.skip_builddep,
            capture_output: args.quiet,
        },
    );

    if args.dry_run {
        pipeline.print_plan();
        return Ok(());
    }

    if args.preflight {
        preflight::run_preflight_or_fail(config, args.skip_builddep)?;
    }

    println!("=== Release Build: {} ===\n", config.project);
    let start = Instant::now();

    let report = pipeline.run()?;

    println!();
    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize run report")?;
        println!("{}", json);
    } else {
        report.print();
    }

    println!(
        "\n=== Build complete in {} ===",
        format_duration(start.elapsed())
    );
    Ok(())
}
