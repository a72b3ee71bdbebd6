//! Version command implementation

use std::env;
use std::path::PathBuf;

use console::Style;

use crate::config::{CONFIG_FILE_ENV, default_config_path};
use crate::database::{DATABASE_FILE_ENV, default_database_path};
use crate::domain::{ComponentKind, ModelTier};
use crate::error::Result;

/// Run version command
pub fn run() -> Result<()> {
    println!("opencode-config {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("{}", Style::new().bold().apply_to("Build info:"));
    for (label, value) in build_info() {
        println!("  {label:<14} {value}");
    }

    Ok(())
}

/// Labelled lines shown under "Build info"
fn build_info() -> Vec<(&'static str, String)> {
    let kinds: Vec<&str> = ComponentKind::ALL.iter().map(|k| k.plural()).collect();
    let tiers: Vec<&str> = ModelTier::ALL.iter().map(|t| t.as_str()).collect();
    vec![
        ("Rust version:", env!("CARGO_PKG_RUST_VERSION").to_string()),
        ("Profile:", if cfg!(debug_assertions) { "debug" } else { "release" }.to_string()),
        ("Config file:", path_from_env(CONFIG_FILE_ENV, default_config_path)),
        ("Database:", path_from_env(DATABASE_FILE_ENV, default_database_path)),
        ("Components:", kinds.join(", ")),
        ("Model tiers:", tiers.join(", ")),
    ]
}

fn path_from_env(var: &str, default: fn() -> PathBuf) -> String {
    env::var_os(var)
        .map_or_else(default, PathBuf::from)
        .display()
        .to_string()
}
