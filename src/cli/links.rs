use clap::Parser;

/// Arguments for the links command
#[derive(Parser, Debug)]
pub struct LinksArgs {
    /// Remove broken links
    #[arg(long)]
    pub clean: bool,

    /// With --clean, only report what would be removed
    #[arg(long, requires = "clean")]
    pub dry_run: bool,
}
