//! Shared utilities across relbuild modules.

pub mod paths;

pub use paths::{ensure_dir_exists, remove_dir_if_exists};
