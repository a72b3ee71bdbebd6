use clap::Parser;

use crate::domain::ModelTier;

/// Arguments for the models command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show configured tiers:\n    opencode-config models\n\n\
                  Configure a tier:\n    opencode-config models --set low github-copilot/claude-haiku-4.5\n\n\
                  Clear every tier:\n    opencode-config models --reset")]
pub struct ModelsArgs {
    /// Show configured tiers (default)
    #[arg(long, short = 'l')]
    pub list: bool,

    /// Set the model of a tier
    #[arg(long, num_args = 2, value_names = ["TIER", "MODEL"], conflicts_with = "reset")]
    pub set: Option<Vec<String>>,

    /// Clear every tier
    #[arg(long)]
    pub reset: bool,
}

impl ModelsArgs {
    /// Tier and model given to `--set`
    pub fn assignment(&self) -> Option<crate::error::Result<(ModelTier, &str)>> {
        match self.set.as_deref() {
            Some([tier, model]) => Some(tier.parse().map(|tier| (tier, model.as_str()))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_models_set() {
        let cli = super::super::Cli::try_parse_from([
            "opencode-config",
            "models",
            "--set",
            "high",
            "vendor/big",
        ])
        .unwrap();
        match cli.command {
            super::super::Commands::Models(args) => {
                let (tier, model) = args.assignment().unwrap().unwrap();
                assert_eq!(tier, ModelTier::High);
                assert_eq!(model, "vendor/big");
            }
            _ => panic!("Expected Models command"),
        }
    }

    #[test]
    fn test_models_invalid_tier() {
        let cli = super::super::Cli::try_parse_from([
            "opencode-config",
            "models",
            "--set",
            "ultra",
            "vendor/big",
        ])
        .unwrap();
        match cli.command {
            super::super::Commands::Models(args) => {
                assert!(args.assignment().unwrap().is_err());
            }
            _ => panic!("Expected Models command"),
        }
    }

    #[test]
    fn test_cli_models_set_conflicts_with_reset() {
        assert!(
            super::super::Cli::try_parse_from([
                "opencode-config",
                "models",
                "--set",
                "high",
                "x",
                "--reset"
            ])
            .is_err()
        );
    }
}
