use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::config::BackendChoice;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(
    group(ArgGroup::new("what").required(true).args(["component", "group"])),
    after_help = "EXAMPLES:\n  \
                   Install a bundle:\n    opencode-config install --group basic\n\n\
                   Install a single component:\n    opencode-config install code-reviewer\n\n\
                   Preview without changing anything:\n    opencode-config install --group basic --dry-run\n\n\
                   Use one model everywhere:\n    opencode-config install --group basic --model github-copilot/gpt-4o\n\n\
                   Link instead of copying:\n    opencode-config install --group basic --method link"
)]
pub struct InstallArgs {
    /// Component id to install
    pub component: Option<String>,

    /// Bundle to install (<registry>/bundles/<name>.yaml)
    #[arg(long, short = 'g', value_name = "NAME")]
    pub group: Option<String>,

    /// Show what would be installed without actually installing
    #[arg(long)]
    pub dry_run: bool,

    /// Target directory (defaults to the configured target)
    #[arg(long, short = 't', value_name = "DIR")]
    pub target: Option<PathBuf>,

    /// Write this model into every component instead of resolving tiers
    #[arg(long, short = 'm', value_name = "MODEL")]
    pub model: Option<String>,

    /// Installation method: copy or link (defaults to the configured method)
    #[arg(long, value_name = "METHOD")]
    pub method: Option<BackendChoice>,
}
