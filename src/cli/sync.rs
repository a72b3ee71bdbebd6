use clap::Parser;

/// Arguments for the sync command
#[derive(Parser, Debug)]
pub struct SyncArgs {
    /// Show what would be recorded without writing the database
    #[arg(long)]
    pub dry_run: bool,
}
