//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - install, uninstall, update, sync: package lifecycle
//! - status, list, info: read-only views
//! - config, models: configuration
//! - links: symbolic link maintenance
//! - completions: shell completions

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod config;
pub mod info;
pub mod install;
pub mod links;
pub mod list;
pub mod models;
pub mod status;
pub mod sync;
pub mod uninstall;
pub mod update;

pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use info::InfoArgs;
pub use install::InstallArgs;
pub use links::LinksArgs;
pub use list::ListArgs;
pub use models::ModelsArgs;
pub use status::StatusArgs;
pub use sync::SyncArgs;
pub use uninstall::UninstallArgs;
pub use update::UpdateArgs;

/// opencode-config - OpenCode component installer
///
/// Install, update and track agents, subagents, skills and commands from a local registry.
#[derive(Parser, Debug)]
#[command(
    name = "opencode-config",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install and track OpenCode components from a local registry",
    long_about = "opencode-config installs OpenCode agents, subagents, skills and commands from a \
                  local registry into ~/.config/opencode, resolving model tiers into concrete \
                  models and tracking what is installed.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  opencode-config models --set high github-copilot/claude-sonnet-4.5 \x1b[90m# Configure a tier\x1b[0m\n   \
                  opencode-config install --group basic         \x1b[90m# Install a bundle\x1b[0m\n   \
                  opencode-config install --group basic --dry-run \x1b[90m# Preview an install\x1b[0m\n   \
                  opencode-config update                        \x1b[90m# Reinstall outdated components\x1b[0m\n   \
                  opencode-config status                        \x1b[90m# Show installed components\x1b[0m\n   \
                  opencode-config uninstall --all               \x1b[90m# Remove everything\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Configuration file (defaults to ~/.opencode-registry/config.json)
    #[arg(long, global = true, env = "OPENCODE_CONFIG_FILE", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Installed database file (defaults to ~/.config/opencode/opencode-registry-installed.json)
    #[arg(long, global = true, env = "OPENCODE_REGISTRY_DB", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install components from the registry
    Install(InstallArgs),

    /// Remove installed components
    Uninstall(UninstallArgs),

    /// Reinstall missing or outdated components
    Update(UpdateArgs),

    /// Rebuild the installed database from the target directory
    Sync(SyncArgs),

    /// Show installation status
    Status(StatusArgs),

    /// List registry components
    List(ListArgs),

    /// Show component details
    Info(InfoArgs),

    /// Show or change configuration
    Config(ConfigArgs),

    /// Show or change model tiers
    Models(ModelsArgs),

    /// Check symbolic links in the target directory
    Links(LinksArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
