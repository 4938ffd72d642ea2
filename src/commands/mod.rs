//! Command implementations for Cartage CLI

pub mod check;
pub mod completions;
pub mod helpers;
pub mod install;
pub mod version;
