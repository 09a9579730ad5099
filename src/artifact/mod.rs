//! Release artifacts - locating and relocating archives and packages.
//!
//! Matching and moving are kept apart:
//! - `scan` - finds dist archives and package files, nothing else
//! - `relocate` - moves a list of paths into the export directory
//! - `digest` - size + SHA-256 listing of exported files

pub mod digest;
pub mod relocate;
pub mod scan;

pub use digest::{list_exported, ExportedFile};
pub use relocate::{move_file, relocate};
pub use scan::{find_archives, find_packages, is_archive_name, is_package_name};
