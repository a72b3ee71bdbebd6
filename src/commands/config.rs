//! Config command implementation

use console::Style;

use crate::cli::ConfigArgs;
use crate::config::expand_home;
use crate::error::Result;
use crate::operations::Context;
use crate::registry::Registry;

use super::helpers::success;

/// Value `--registry` accepts to return to auto-detection
pub const AUTO_REGISTRY: &str = "auto";

/// Run the config command
pub fn run(ctx: &mut Context, args: &ConfigArgs) -> Result<()> {
    let config = &mut ctx.config;
    let mut changed = false;

    if let Some(target) = &args.target {
        let target = expand_home(&target.to_string_lossy());
        config.set_target(&target)?;
        success(format!("Target set to {}", target.display()));
        changed = true;
    }

    if let Some(registry) = &args.registry {
        if registry == AUTO_REGISTRY {
            config.set_registry_path(None)?;
            success("Registry will be auto-detected");
        } else {
            let path = expand_home(registry);
            if !Registry::is_registry(&path) {
                eprintln!(
                    "{} {} has no opencode/ and bundles/ directories",
                    Style::new().yellow().apply_to("Warning:"),
                    path.display()
                );
            }
            config.set_registry_path(Some(&path))?;
            success(format!("Registry set to {}", path.display()));
        }
        changed = true;
    }

    if let Some(method) = args.method {
        config.set_backend_choice(method)?;
        success(format!("Installation method set to {method}"));
        changed = true;
    }

    if changed && !args.list {
        return Ok(());
    }

    let bold = Style::new().bold();
    println!("{} {}", bold.apply_to("Configuration:"), config.path().display());
    for (key, value) in config.entries() {
        let shown = match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => "(not set)".to_string(),
            other => other.to_string(),
        };
        println!("  {key:<16} {shown}");
    }
    match config.resolve_registry(&ctx.cwd) {
        Ok(path) => println!("  {:<16} {}", "(resolved)", path.display()),
        Err(_) => println!("  {:<16} not found", "(resolved)"),
    }
    Ok(())
}
