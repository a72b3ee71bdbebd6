//! Shell completions command

use clap::CommandFactory;

use crate::cli::CompletionsArgs;
use crate::error::{RegistryError, Result};

/// Shell named on the command line, case-insensitive
pub fn parse_shell(name: &str) -> Result<clap_complete::Shell> {
    match name.to_lowercase().as_str() {
        "bash" => Ok(clap_complete::Shell::Bash),
        "elvish" => Ok(clap_complete::Shell::Elvish),
        "fish" => Ok(clap_complete::Shell::Fish),
        "powershell" | "pwsh" => Ok(clap_complete::Shell::PowerShell),
        "zsh" => Ok(clap_complete::Shell::Zsh),
        _ => Err(RegistryError::NotSupported {
            feature: format!("shell '{name}'"),
            hint: "Supported shells: bash, elvish, fish, powershell, zsh".to_string(),
        }),
    }
}

/// Generate shell completions
pub fn run(args: &CompletionsArgs) -> Result<()> {
    let shell = parse_shell(&args.shell)?;
    let mut cmd = <crate::cli::Cli as CommandFactory>::command();
    clap_complete::generate(shell, &mut cmd, "opencode-config", &mut std::io::stdout().lock());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_bash() {
        let args = CompletionsArgs {
            shell: "bash".to_string(),
        };
        assert!(run(&args).is_ok());
    }

    #[test]
    fn test_completions_zsh_mixed_case() {
        let args = CompletionsArgs {
            shell: "Zsh".to_string(),
        };
        assert!(run(&args).is_ok());
    }

    #[test]
    fn test_parse_shell_aliases() {
        assert_eq!(parse_shell("pwsh").unwrap(), clap_complete::Shell::PowerShell);
        assert_eq!(parse_shell("FISH").unwrap(), clap_complete::Shell::Fish);
    }

    #[test]
    fn test_unknown_shell() {
        assert!(matches!(
            parse_shell("tcsh"),
            Err(RegistryError::NotSupported { .. })
        ));
    }
}
