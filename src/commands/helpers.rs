//! Command helper utilities

use std::path::Path;

use console::Style;

use crate::domain::{ComponentKind, DetectedComponents};
use crate::error::Result;
use crate::installer::InstallOutcome;
use crate::operations::Context;

/// Open configuration and database from the global `--config` / `--database` paths
pub fn open_context(config: Option<&Path>, database: Option<&Path>) -> Result<Context> {
    Context::open(config, database)
}

/// Verb shown for each processed file
pub fn file_verb(method: &str, removing: bool) -> &'static str {
    match (removing, method) {
        (true, _) => "remove",
        (false, "copy") => "copy",
        (false, _) => "link",
    }
}

/// Print warnings and per-file failures of a backend run
pub fn print_problems(outcome: &InstallOutcome) {
    let yellow = Style::new().yellow();
    let red = Style::new().red();
    for warning in &outcome.warnings {
        eprintln!("{} {warning}", yellow.apply_to("Warning:"));
    }
    for failure in &outcome.failures {
        eprintln!("{} {failure}", red.apply_to("Failed:"));
    }
}

/// Print the files a dry run would touch
pub fn print_dry_run(outcome: &InstallOutcome, verb: &str) {
    let dim = Style::new().dim();
    for path in &outcome.processed {
        println!("  {} {}", dim.apply_to(format!("Would {verb}:")), path.display());
    }
    println!();
    println!(
        "{} {} file(s) would be {}",
        Style::new().bold().apply_to("Dry run:"),
        outcome.processed.len(),
        past_tense(verb)
    );
}

fn past_tense(verb: &str) -> &'static str {
    match verb {
        "copy" => "copied",
        "remove" => "removed",
        _ => "linked",
    }
}

/// Print detected components grouped by kind, skipping empty kinds
pub fn print_components(components: &DetectedComponents) {
    let bold = Style::new().bold();
    for kind in ComponentKind::ALL {
        let ids = components.ids(kind);
        if ids.is_empty() {
            continue;
        }
        println!("  {} ({})", bold.apply_to(kind.plural()), ids.len());
        for id in ids {
            println!("    {id}");
        }
    }
}

/// Green check line
pub fn success(message: impl std::fmt::Display) {
    println!("{} {message}", Style::new().green().bold().apply_to("✓"));
}
