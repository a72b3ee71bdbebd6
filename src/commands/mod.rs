//! Command implementations for the opencode-config CLI
//!
//! Each command parses its arguments into operation options, runs the
//! operation and prints the result.

pub mod completions;
pub mod config;
pub mod helpers;
pub mod info;
pub mod install;
pub mod links;
pub mod list;
pub mod models;
pub mod status;
pub mod sync;
pub mod uninstall;
pub mod update;
pub mod version;
