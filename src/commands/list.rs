//! List command implementation

use console::Style;

use crate::cli::ListArgs;
use crate::domain::{ComponentKind, ComponentManifest};
use crate::error::Result;
use crate::operations::Context;

/// Filters applied to the registry listing
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub kind: Option<ComponentKind>,
    pub tag: Option<String>,
    pub installed: bool,
}

impl From<&ListArgs> for ListOptions {
    fn from(args: &ListArgs) -> Self {
        Self {
            kind: args.kind,
            tag: args.tag.clone(),
            installed: args.installed,
        }
    }
}

/// Registry components passing every filter, in kind then id order
pub fn filter_components(
    components: Vec<ComponentManifest>,
    options: &ListOptions,
    is_installed: impl Fn(&str) -> bool,
) -> Vec<ComponentManifest> {
    components
        .into_iter()
        .filter(|c| options.kind.is_none_or(|kind| c.kind == kind))
        .filter(|c| options.tag.as_deref().is_none_or(|tag| c.has_tag(tag)))
        .filter(|c| !options.installed || is_installed(&c.id))
        .collect()
}

/// Run the list command
pub fn run(ctx: &Context, args: &ListArgs) -> Result<()> {
    let options = ListOptions::from(args);
    let registry = ctx.registry()?;
    let db = &ctx.database;
    let components = filter_components(registry.list_components(), &options, |id| db.is_installed(id));

    if components.is_empty() {
        println!("No components found.");
        return Ok(());
    }

    let bold = Style::new().bold();
    let dim = Style::new().dim();
    let green = Style::new().green();
    println!("Components ({}):", components.len());

    for kind in ComponentKind::ALL {
        let of_kind: Vec<_> = components.iter().filter(|c| c.kind == kind).collect();
        if of_kind.is_empty() {
            continue;
        }
        println!();
        println!("  {}", bold.apply_to(kind.plural()));
        for component in of_kind {
            let marker = if db.is_installed(&component.id) {
                green.apply_to("●").to_string()
            } else {
                " ".to_string()
            };
            println!(
                "  {marker} {:<28} {} {}",
                component.id,
                dim.apply_to(format!("v{}", component.version)),
                component.description
            );
        }
    }
    Ok(())
}
