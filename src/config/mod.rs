//! Manifest handling for Cartage
//!
//! This module contains:
//! - [`DependencySet`] - the ordered dependency list shared by both files
//! - `Cartridge` - the human-edited manifest of requested dependencies
//! - `Cartridge.lock` - the generated manifest pinning resolved versions
//! - reading, merging and writing of those two files

pub mod io;
pub mod merge;
pub mod set;

pub use io::{load, load_if_present, save_lock};
pub use set::DependencySet;

/// Manifest of requested dependencies
pub const MANIFEST_FILE: &str = "Cartridge";

/// Manifest of resolved dependency versions
pub const LOCK_FILE: &str = "Cartridge.lock";

/// Tag excluded from every nested manifest in a recursive walk
pub const NESTED_EXCLUDED_TAG: &str = "test";
