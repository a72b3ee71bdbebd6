//! Update command implementation

use console::Style;

use crate::cli::UpdateArgs;
use crate::error::Result;
use crate::operations::{Context, UpdateOperation, UpdateOptions};
use crate::progress::ProgressDisplay;

use super::helpers::{print_problems, success};

impl From<&UpdateArgs> for UpdateOptions {
    fn from(args: &UpdateArgs) -> Self {
        Self {
            component: args.component.clone(),
            dry_run: args.dry_run,
        }
    }
}

/// Run the update command
pub fn run(ctx: &mut Context, args: &UpdateArgs) -> Result<()> {
    let options = UpdateOptions::from(args);
    let progress = ProgressDisplay::new("Checking for updates...");
    let report = match UpdateOperation::new(ctx, options).execute() {
        Ok(report) => {
            progress.finish();
            report
        }
        Err(e) => {
            progress.abandon();
            return Err(e);
        }
    };

    if report.plan.is_empty() {
        success("All components are up to date");
        return Ok(());
    }

    let bold = Style::new().bold();
    let yellow = Style::new().yellow();
    if !report.plan.missing.is_empty() {
        println!("{}", bold.apply_to("Missing from target:"));
        for id in &report.plan.missing {
            println!("  {id}");
        }
    }
    if !report.plan.updates.is_empty() {
        println!("{}", bold.apply_to("Updates available:"));
        for update in &report.plan.updates {
            println!(
                "  {} ({}) {} -> {}",
                update.id,
                update.kind,
                update.installed,
                yellow.apply_to(&update.available)
            );
        }
    }
    println!();

    if !report.applied() {
        println!("Dry run: run 'opencode-config update' to apply");
        return Ok(());
    }

    if let Some(outcome) = &report.outcome {
        print_problems(outcome);
    }
    if let Some(detected) = &report.detected {
        success(format!(
            "Updated {} component(s); {} installed",
            report.plan.affected_ids().len(),
            detected.len()
        ));
    }
    Ok(())
}
