use clap::{ArgGroup, Parser};

/// Arguments for the update command
#[derive(Parser, Debug)]
#[command(
    group(ArgGroup::new("what").args(["component", "all"])),
    after_help = "EXAMPLES:\n  \
                  Update everything:\n    opencode-config update\n\n\
                  Check one component:\n    opencode-config update code-reviewer\n\n\
                  Show available updates only:\n    opencode-config update --dry-run"
)]
pub struct UpdateArgs {
    /// Component id to check (all tracked components when omitted)
    pub component: Option<String>,

    /// Check every tracked component
    #[arg(long)]
    pub all: bool,

    /// Show available updates without applying them
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_update_defaults_to_all() {
        let cli = super::super::Cli::try_parse_from(["opencode-config", "update"]).unwrap();
        match cli.command {
            super::super::Commands::Update(args) => {
                assert_eq!(args.component, None);
                assert!(!args.dry_run);
            }
            _ => panic!("Expected Update command"),
        }
    }

    #[test]
    fn test_cli_update_component_conflicts_with_all() {
        assert!(
            super::super::Cli::try_parse_from(["opencode-config", "update", "pdf", "--all"])
                .is_err()
        );
    }
}
