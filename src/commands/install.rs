//! Install command implementation
//!
//! The install process:
//! 1. Resolve the registry and check model tiers
//! 2. Validate the requested bundle or component
//! 3. Copy or link the package into the target directory
//! 4. Rebuild the installed database from what landed on disk

use console::Style;

use crate::cli::InstallArgs;
use crate::error::{RegistryError, Result};
use crate::operations::{Context, InstallOperation, InstallOptions, InstallRequest};
use crate::progress::ProgressDisplay;

use super::helpers::{file_verb, print_components, print_dry_run, print_problems, success};

impl From<&InstallArgs> for InstallOptions {
    fn from(args: &InstallArgs) -> Self {
        let request = match &args.group {
            Some(group) => InstallRequest::Bundle(group.clone()),
            None => InstallRequest::Component(args.component.clone().unwrap_or_default()),
        };
        Self {
            request,
            dry_run: args.dry_run,
            target: args.target.clone(),
            model: args.model.clone(),
            method: args.method,
        }
    }
}

/// Run the install command
pub fn run(ctx: &mut Context, args: &InstallArgs) -> Result<()> {
    let options = InstallOptions::from(args);
    let label = match &options.request {
        InstallRequest::Bundle(name) => format!("bundle '{name}'"),
        InstallRequest::Component(id) => format!("'{id}'"),
    };

    let progress = (!options.dry_run).then(|| ProgressDisplay::new(format!("Installing {label}...")));
    let result = InstallOperation::new(ctx, options.clone()).execute();
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            if let Some(progress) = &progress {
                progress.abandon();
            }
            return Err(e);
        }
    };
    if let Some(progress) = &progress {
        progress.finish();
    }

    let bold = Style::new().bold();
    if let Some(bundle) = &report.bundle {
        println!("{} {}", bold.apply_to("Bundle:"), bundle.name);
        if !bundle.description.is_empty() {
            println!("  {}", bundle.description);
        }
    }
    println!("{} {}", bold.apply_to("Registry:"), report.registry.display());
    println!("{} {}", bold.apply_to("Target:"), report.target.display());
    println!("{} {}", bold.apply_to("Method:"), report.method);
    if let Some(model) = &options.model {
        println!("{} {model}", bold.apply_to("Model override:"));
    }
    println!();

    print_problems(&report.outcome);

    if options.dry_run {
        print_dry_run(&report.outcome, file_verb(report.method, false));
        return Ok(());
    }

    if let Some(detected) = &report.detected {
        success(format!("Installed {label} ({} components)", detected.len()));
        print_components(detected);
        Ok(())
    } else {
        Err(RegistryError::IoError {
            message: format!(
                "Installation of {label} failed: {} file(s) could not be installed",
                report.outcome.failures.len()
            ),
        })
    }
}
