//! Uninstall command implementation

use crate::cli::UninstallArgs;
use crate::error::Result;
use crate::operations::{Context, UninstallOperation, UninstallOptions, UninstallRequest};

use super::helpers::{file_verb, print_dry_run, print_problems, success};

impl From<&UninstallArgs> for UninstallOptions {
    fn from(args: &UninstallArgs) -> Self {
        let request = if args.all {
            UninstallRequest::All
        } else if let Some(group) = &args.group {
            UninstallRequest::Bundle(group.clone())
        } else {
            UninstallRequest::Component(args.component.clone().unwrap_or_default())
        };
        Self {
            request,
            dry_run: args.dry_run,
            yes: args.yes,
        }
    }
}

/// Run the uninstall command
pub fn run(ctx: &mut Context, args: &UninstallArgs) -> Result<()> {
    let options = UninstallOptions::from(args);
    let dry_run = options.dry_run;
    let label = match &options.request {
        UninstallRequest::All => "all components".to_string(),
        UninstallRequest::Bundle(name) => format!("bundle '{name}'"),
        UninstallRequest::Component(id) => format!("'{id}'"),
    };

    let report = UninstallOperation::new(ctx, options).execute()?;
    print_problems(&report.outcome);

    if dry_run {
        print_dry_run(&report.outcome, file_verb(report.method, true));
        return Ok(());
    }

    success(format!(
        "Uninstalled {label} ({} files removed)",
        report.outcome.processed.len()
    ));
    Ok(())
}
