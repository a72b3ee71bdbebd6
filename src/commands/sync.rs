//! Sync command implementation

use console::Style;

use crate::cli::SyncArgs;
use crate::error::Result;
use crate::operations::{Context, SyncOperation, SyncOptions};

use super::helpers::{print_components, success};

impl From<&SyncArgs> for SyncOptions {
    fn from(args: &SyncArgs) -> Self {
        Self {
            dry_run: args.dry_run,
        }
    }
}

/// Run the sync command
pub fn run(ctx: &mut Context, args: &SyncArgs) -> Result<()> {
    let options = SyncOptions::from(args);
    let report = SyncOperation::new(ctx, options.clone()).execute()?;

    let bold = Style::new().bold();
    println!("{} {} component(s) on disk", bold.apply_to("Detected:"), report.detected.len());
    print_components(&report.detected);
    for id in &report.added {
        println!("  {} {id}", Style::new().green().apply_to("+"));
    }
    for id in &report.removed {
        println!("  {} {id}", Style::new().red().apply_to("-"));
    }
    println!();

    if options.dry_run {
        println!("Dry run: database not changed");
    } else {
        success(format!("Database synced ({} method)", report.method));
    }
    Ok(())
}
