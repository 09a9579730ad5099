//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `build` - Run the release pipeline
//! - `preflight` - Run preflight checks
//! - `show` - Display configuration or exported artifacts
//! - `clean` - Remove scratch and export directories

pub mod build;
pub mod clean;
mod preflight;
pub mod show;

pub use build::cmd_build;
pub use clean::cmd_clean;
pub use preflight::cmd_preflight;
pub use show::cmd_show;
