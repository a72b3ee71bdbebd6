use clap::Parser;
use std::path::PathBuf;

use crate::config::BackendChoice;

/// Arguments for the config command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show configuration:\n    opencode-config config --list\n\n\
                  Change the target directory:\n    opencode-config config --target ~/.config/opencode\n\n\
                  Point at a registry:\n    opencode-config config --registry ~/src/opencode-registry\n\n\
                  Go back to auto-detection:\n    opencode-config config --registry auto")]
pub struct ConfigArgs {
    /// Show every configuration value
    #[arg(long, short = 'l')]
    pub list: bool,

    /// Set the target directory
    #[arg(long, value_name = "DIR")]
    pub target: Option<PathBuf>,

    /// Set the registry path, or 'auto' to detect it from the current directory
    #[arg(long, value_name = "PATH")]
    pub registry: Option<String>,

    /// Set the default installation method (auto, copy, link)
    #[arg(long, value_name = "METHOD")]
    pub method: Option<BackendChoice>,
}
