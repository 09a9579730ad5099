//! Relbuild - release artifact builder.
//!
//! Drives an autotools + RPM release:
//! - `./autogen.sh --system` and `make dist` produce the source tarball
//! - `dnf builddep` / `yum-builddep` installs build requirements
//! - `rpmbuild -ta` builds binary and source RPMs in a scratch topdir
//! - tarballs and RPMs are collected into `exported-artifacts/`

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use relbuild::commands::{
    self,
    build::BuildArgs,
    clean::CleanTarget as Clean,
    show::ShowTarget as Show,
};
use relbuild::config::Config;

#[derive(Parser)]
#[command(name = "relbuild")]
#[command(about = "Release artifact builder (autotools dist + rpmbuild)")]
#[command(
    after_help = "QUICK START:\n  relbuild preflight  Check tools and inputs\n  relbuild build      Build tarball and RPMs into exported-artifacts/\n  relbuild show artifacts\n  relbuild clean      Remove the rpmbuild scratch tree"
)]
struct Cli {
    /// Project source directory (default: current directory)
    #[arg(short = 'C', long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full release pipeline
    Build {
        /// Print the steps and commands without running anything
        #[arg(long)]
        dry_run: bool,
        /// Run strict preflight checks first
        #[arg(long)]
        preflight: bool,
        /// Don't install build dependencies (unprivileged local builds)
        #[arg(long)]
        skip_builddep: bool,
        /// Capture tool output; show it only when a step fails
        #[arg(short, long)]
        quiet: bool,
        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run preflight checks (verify tools and inputs before build)
    Preflight {
        /// Fail if any checks fail (exit code 1)
        #[arg(long)]
        strict: bool,
        /// Don't require a builddep resolver
        #[arg(long)]
        skip_builddep: bool,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },

    /// Clean build directories (default: scratch tree only)
    Clean {
        #[command(subcommand)]
        what: Option<CleanTarget>,
    },
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show resolved configuration
    Config {
        #[arg(long)]
        json: bool,
    },
    /// List exported artifacts with SHA-256
    Artifacts {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CleanTarget {
    /// Remove the rpmbuild scratch tree (tmp.repos)
    Scratch,
    /// Remove exported artifacts
    Exported,
    /// Remove both
    All,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let dir = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let work_dir = dir
        .canonicalize()
        .with_context(|| format!("Project directory {} not found", dir.display()))?;
    let config = Config::load(&work_dir)?;

    match cli.command {
        Commands::Build {
            dry_run,
            preflight,
            skip_builddep,
            quiet,
            json,
        } => {
            let args = BuildArgs {
                dry_run,
                preflight,
                skip_builddep,
                quiet,
                json,
            };
            commands::cmd_build(&config, args)?;
        }

        Commands::Preflight {
            strict,
            skip_builddep,
        } => {
            commands::cmd_preflight(&config, strict, skip_builddep)?;
        }

        Commands::Show { what } => {
            let show_target = match what {
                ShowTarget::Config { json } => Show::Config { json },
                ShowTarget::Artifacts { json } => Show::Artifacts { json },
            };
            commands::cmd_show(show_target, &config)?;
        }

        Commands::Clean { what } => {
            let clean_target = match what {
                None | Some(CleanTarget::Scratch) => Clean::Scratch,
                Some(CleanTarget::Exported) => Clean::Exported,
                Some(CleanTarget::All) => Clean::All,
            };
            commands::cmd_clean(&config, clean_target)?;
        }
    }

    Ok(())
}
