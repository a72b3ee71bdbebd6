use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    opencode-config completions --shell bash > ~/.bash_completion.d/opencode-config\n\n\
                  Generate zsh completions:\n    opencode-config completions --shell zsh > ~/.zfunc/_opencode-config\n\n\
                  Generate fish completions:\n    opencode-config completions --shell fish > ~/.config/fish/completions/opencode-config.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long, short = 's')]
    pub shell: String,
}
