//! Models command implementation

use console::Style;

use crate::cli::ModelsArgs;
use crate::error::Result;
use crate::operations::Context;
use crate::operations::install::tier_setup_hint;

use super::helpers::success;

/// Run the models command
pub fn run(ctx: &mut Context, args: &ModelsArgs) -> Result<()> {
    if let Some(assignment) = args.assignment() {
        let (tier, model) = assignment?;
        ctx.config.set_model_tier(tier, Some(model))?;
        success(format!("Tier '{tier}' set to {model}"));
        return Ok(());
    }

    if args.reset {
        ctx.config.reset_model_tiers()?;
        success("All model tiers cleared");
        return Ok(());
    }

    let bold = Style::new().bold();
    let dim = Style::new().dim();
    println!("{}", bold.apply_to("Model tiers:"));
    for (tier, model) in ctx.config.list_model_tiers() {
        let shown = model.unwrap_or_else(|| Style::new().yellow().apply_to("(not set)").to_string());
        println!("  {} {shown}", bold.apply_to(format!("{tier:<7}")));
        println!("          {}", dim.apply_to(tier.use_case()));
    }

    let missing = ctx.config.missing_tiers();
    if !missing.is_empty() {
        println!();
        println!("Configure the missing tiers with:");
        for line in tier_setup_hint(&missing).lines() {
            println!("  {line}");
        }
    }
    Ok(())
}
