//! Links command implementation

use console::Style;

use crate::cli::LinksArgs;
use crate::error::Result;
use crate::installer::LinkBackend;
use crate::operations::Context;

use super::helpers::success;

/// Run the links command
pub fn run(ctx: &Context, args: &LinksArgs) -> Result<()> {
    let registry = ctx.registry()?;
    let target = ctx.installed_target_dir();
    let backend = LinkBackend::new(registry.root(), &target);

    let broken = backend.verify_symlinks();
    if broken.is_empty() {
        success(format!("No broken links in {}", target.display()));
        return Ok(());
    }

    println!("{} {}", Style::new().bold().apply_to("Broken links:"), broken.len());
    for link in &broken {
        println!("  {}", link.display());
    }

    if args.clean {
        let removed = backend.clean_broken_symlinks(args.dry_run)?;
        if args.dry_run {
            println!("\nDry run: {removed} link(s) would be removed");
        } else {
            success(format!("Removed {removed} broken link(s)"));
        }
    } else {
        println!("\nRun 'opencode-config links --clean' to remove them");
    }
    Ok(())
}
