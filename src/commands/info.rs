//! Info command implementation

use console::Style;

use crate::cli::InfoArgs;
use crate::error::{RegistryError, Result};
use crate::manifest::{ManifestParser, RawManifest};
use crate::operations::Context;

macro_rules! display_field {
    ($label:expr, $value:expr) => {
        if !$value.is_empty() {
            println!("{} {}", Style::new().bold().apply_to($label), $value);
        }
    };
}

/// Run the info command
pub fn run(ctx: &Context, args: &InfoArgs) -> Result<()> {
    let registry = ctx.registry()?;
    let Some((kind, path)) = registry.find_any(&args.component) else {
        return Err(RegistryError::ComponentNotFound {
            id: args.component.clone(),
        });
    };
    let manifest = ManifestParser::create_from_md(&path, kind)?;

    println!("{}", Style::new().bold().yellow().apply_to(&manifest.name));
    display_field!("Id:", manifest.id);
    let kind = manifest.kind.to_string();
    display_field!("Type:", kind);
    display_field!("Version:", manifest.version);
    display_field!("Description:", manifest.description);
    display_field!("Author:", manifest.author);
    if !manifest.tags.is_empty() {
        let tags: Vec<&str> = manifest.tags.iter().map(String::as_str).collect();
        let tags = tags.join(", ");
        display_field!("Tags:", tags);
    }
    if !manifest.dependencies.is_empty() {
        let dependencies = manifest.dependencies.join(", ");
        display_field!("Dependencies:", dependencies);
    }
    if let Some(tier) = manifest.model_tier {
        let resolved = ctx
            .config
            .get_model_for_tier(tier)
            .unwrap_or_else(|| "not configured".to_string());
        let shown = format!("{tier} ({resolved})");
        display_field!("Model tier:", shown);
    }
    if let Some(model) = &manifest.model {
        display_field!("Model:", model);
    }
    let file = path.display().to_string();
    display_field!("File:", file);

    match ctx.database.get_installed_version(&manifest.id) {
        Some(version) => display_field!("Installed:", version),
        None => display_field!("Installed:", "no"),
    }

    let raw = ManifestParser::parse_frontmatter(&path)?
        .map(|fm| RawManifest::from_frontmatter(&manifest.id, &fm))
        .unwrap_or_else(|| RawManifest {
            id: Some(manifest.id.clone()),
            ..RawManifest::default()
        });
    let problems = ManifestParser::validate(&raw);
    if !problems.is_empty() {
        println!();
        for problem in problems {
            println!("{} {problem}", Style::new().yellow().apply_to("Warning:"));
        }
    }
    Ok(())
}
