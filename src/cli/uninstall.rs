use clap::{ArgGroup, Parser};

/// Arguments for the uninstall command
#[derive(Parser, Debug)]
#[command(
    group(ArgGroup::new("what").required(true).args(["component", "group", "all"])),
    after_help = "EXAMPLES:\n  \
                  Uninstall everything:\n    opencode-config uninstall --all\n\n\
                  Uninstall without confirmation:\n    opencode-config uninstall --all -y\n\n\
                  Uninstall a bundle:\n    opencode-config uninstall --group basic\n\n\
                  Preview:\n    opencode-config uninstall --all --dry-run"
)]
pub struct UninstallArgs {
    /// Component id to uninstall
    pub component: Option<String>,

    /// Bundle to uninstall
    #[arg(long, short = 'g', value_name = "NAME")]
    pub group: Option<String>,

    /// Uninstall every component
    #[arg(long)]
    pub all: bool,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Show what would be uninstalled without actually uninstalling
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_uninstall_all() {
        let cli =
            super::super::Cli::try_parse_from(["opencode-config", "uninstall", "--all", "-y"])
                .unwrap();
        match cli.command {
            super::super::Commands::Uninstall(args) => {
                assert!(args.all);
                assert!(args.yes);
                assert!(!args.dry_run);
                assert_eq!(args.group, None);
            }
            _ => panic!("Expected Uninstall command"),
        }
    }

    #[test]
    fn test_cli_parsing_uninstall_group_dry_run() {
        let cli = super::super::Cli::try_parse_from([
            "opencode-config",
            "uninstall",
            "--group",
            "basic",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            super::super::Commands::Uninstall(args) => {
                assert_eq!(args.group, Some("basic".to_string()));
                assert!(args.dry_run);
                assert!(!args.all);
            }
            _ => panic!("Expected Uninstall command"),
        }
    }

    #[test]
    fn test_cli_uninstall_requires_a_selection() {
        assert!(super::super::Cli::try_parse_from(["opencode-config", "uninstall"]).is_err());
    }
}
