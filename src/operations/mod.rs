//! Operations module for installing, updating and tracking components
//!
//! This module provides high-level operations that coordinate:
//! - InstallOperation: install the registry package and reconcile the database
//! - UpdateOperation: reinstall when tracked components are missing or outdated
//! - UninstallOperation: remove everything, or a bundle
//! - SyncOperation: rebuild the database from the target directory
//! - StatusOperation: read-only snapshot
//!
//! Every operation receives the opened [`Context`] instead of reopening the
//! configuration or the database itself.

pub mod context;
pub mod install;
pub mod status;
pub mod sync;
pub mod uninstall;
pub mod update;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::Context;
pub use install::{InstallOperation, InstallOptions, InstallReport, InstallRequest};
pub use status::{StatusOperation, StatusReport};
pub use sync::{SyncOperation, SyncOptions, SyncReport};
pub use uninstall::{UninstallOperation, UninstallOptions, UninstallReport, UninstallRequest};
pub use update::{UpdateOperation, UpdateOptions, UpdatePlan, UpdateReport};
