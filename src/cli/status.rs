use clap::Parser;

/// Arguments for the status command
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// List every tracked component with its version
    #[arg(long, short = 'd')]
    pub details: bool,
}
