//! opencode-config - OpenCode component installer
//!
//! Command line entry point: parses arguments, sets up logging, opens the
//! configuration and database and dispatches to the command.

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use opencode_config::cli::{Cli, Commands};
use opencode_config::commands::{self, helpers};
use opencode_config::error::Result;

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `RUST_LOG` environment variable (if set)
/// 2. `--verbose` sets level to DEBUG
/// 3. `log_level` from the configuration file
fn init_tracing(verbose: bool, configured: Option<&str>) {
    let level = if verbose {
        "debug".to_string()
    } else {
        configured.unwrap_or("warn").to_lowercase()
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("opencode_config={level}")));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Version => {
            init_tracing(cli.verbose, None);
            return commands::version::run();
        }
        Commands::Completions(args) => {
            init_tracing(cli.verbose, None);
            return commands::completions::run(args);
        }
        _ => {}
    }

    let mut ctx = helpers::open_context(cli.config.as_deref(), cli.database.as_deref())?;
    init_tracing(cli.verbose, Some(&ctx.config.log_level()));
    tracing::debug!(
        "Using configuration {} and database {}",
        ctx.config.path().display(),
        ctx.database.path().display()
    );

    match &cli.command {
        Commands::Install(args) => commands::install::run(&mut ctx, args),
        Commands::Uninstall(args) => commands::uninstall::run(&mut ctx, args),
        Commands::Update(args) => commands::update::run(&mut ctx, args),
        Commands::Sync(args) => commands::sync::run(&mut ctx, args),
        Commands::Status(args) => commands::status::run(&ctx, args),
        Commands::List(args) => commands::list::run(&ctx, args),
        Commands::Info(args) => commands::info::run(&ctx, args),
        Commands::Config(args) => commands::config::run(&mut ctx, args),
        Commands::Models(args) => commands::models::run(&mut ctx, args),
        Commands::Links(args) => commands::links::run(&ctx, args),
        Commands::Version | Commands::Completions(_) => Ok(()),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        if let Some(help) = e.help() {
            for line in help.to_string().lines() {
                eprintln!("  {line}");
            }
        }
        std::process::exit(1);
    }
}
