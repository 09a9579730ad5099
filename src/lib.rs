//! Relbuild library exports.
//!
//! The binary in `main.rs` is a thin clap front end over these modules;
//! integration tests in `tests/` drive them directly.

pub mod artifact;
pub mod commands;
pub mod common;
pub mod config;
pub mod pipeline;
pub mod preflight;
pub mod process;
pub mod timing;
