//! Show command - displays information.

use anyhow::{Context, Result};

use crate::artifact::list_exported;
use crate::config::Config;

/// Show target for the show command.
pub enum ShowTarget {
    /// Show configuration
    Config { json: bool },
    /// Show exported artifacts with digests
    Artifacts { json: bool },
}

/// Execute the show command.
pub fn cmd_show(target: ShowTarget, config: &Config) -> Result<()> {
    match target {
        ShowTarget::Config { json: false } => config.print(),
        ShowTarget::Config { json: true } => {
            let value = serde_json::json!({
                "config": config,
                "interpreter": config.resolve_interpreter(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        ShowTarget::Artifacts { json } => {
            let files = list_exported(&config.export_dir)
                .context("Failed to list exported artifacts")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&files)?);
                return Ok(());
            }
            if files.is_empty() {
                println!(
                    "No artifacts in {}. Run 'relbuild build' first.",
                    config.export_dir.display()
                );
                return Ok(());
            }
            println!("Artifacts in {}:", config.export_dir.display());
            for file in &files {
                let name = file
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                println!("  {}  {:>10}  {}", file.sha256, file.size, name);
            }
        }
    }
    Ok(())
}
