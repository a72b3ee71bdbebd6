//! opencode-config - OpenCode component installer
//!
//! Installs agents, subagents, skills and commands from a local registry into
//! an OpenCode configuration directory, resolving model tiers into concrete
//! models and keeping a database of what is installed.

pub mod cli;
pub mod commands;
pub mod config;
pub mod database;
pub mod domain;
pub mod error;
pub mod frontmatter;
pub mod installer;
pub mod manifest;
pub mod operations;
pub mod progress;
pub mod registry;
pub mod template;
pub mod version;
