use clap::Parser;

use crate::domain::ComponentKind;

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List everything in the registry:\n    opencode-config list\n\n\
                  List skills only:\n    opencode-config list --type skill\n\n\
                  List components tagged 'review':\n    opencode-config list --tag review\n\n\
                  List installed components:\n    opencode-config list --installed")]
pub struct ListArgs {
    /// Only components of this type (agent, subagent, skill, command)
    #[arg(long = "type", short = 't', value_name = "TYPE")]
    pub kind: Option<ComponentKind>,

    /// Only components carrying this tag
    #[arg(long, value_name = "TAG")]
    pub tag: Option<String>,

    /// Only installed components
    #[arg(long, short = 'i')]
    pub installed: bool,
}
