//! Status command implementation

use console::Style;

use crate::cli::StatusArgs;
use crate::error::Result;
use crate::operations::{Context, StatusOperation};

/// Run the status command
pub fn run(ctx: &Context, args: &StatusArgs) -> Result<()> {
    let report = StatusOperation::new(ctx).execute()?;

    let bold = Style::new().bold();
    let dim = Style::new().dim();
    println!("{} {}", bold.apply_to("Target:"), report.target.display());
    match &report.registry {
        Some(path) => println!("{} {}", bold.apply_to("Registry:"), path.display()),
        None => println!("{} {}", bold.apply_to("Registry:"), dim.apply_to("not found")),
    }
    println!("{} {}", bold.apply_to("Method:"), report.install_method);
    println!("{} {}", bold.apply_to("Last updated:"), report.last_updated);
    if !report.bundles.is_empty() {
        println!("{} {}", bold.apply_to("Bundles:"), report.bundles.join(", "));
    }
    println!();

    println!("{}", bold.apply_to("Model tiers:"));
    for (tier, model) in &report.tiers {
        match model {
            Some(model) => println!("  {tier:<7} {model}"),
            None => println!("  {tier:<7} {}", dim.apply_to("(not set)")),
        }
    }
    println!();

    println!("{} {}", bold.apply_to("Installed components:"), report.tracked.len());
    if args.details {
        for component in &report.tracked {
            let marker = if component.on_disk {
                Style::new().green().apply_to("✓")
            } else {
                Style::new().red().apply_to("✗")
            };
            println!(
                "  {marker} {} {} {}",
                component.id,
                dim.apply_to(component.kind),
                component.version
            );
        }
    }

    if !report.in_sync() {
        println!();
        let missing = report.tracked.iter().filter(|c| !c.on_disk).count();
        println!(
            "{} {missing} tracked component(s) missing, {} untracked on disk",
            Style::new().yellow().apply_to("Out of sync:"),
            report.untracked.len()
        );
        println!("  Run 'opencode-config sync' to rebuild the database");
    }
    Ok(())
}
