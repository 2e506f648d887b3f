//! navmenu CLI - Navigation menu resolution.
//!
//! Provides commands for:
//! - `build`: Resolve a stored menu tree and print it as JSON
//! - `outline`: Resolve a stored menu tree and print it as an indented outline
//! - `check`: Validate a stored menu tree without resolving it

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CheckArgs, OutlineArgs};
use output::Output;

/// navmenu - Navigation menu resolution.
#[derive(Parser)]
#[command(name = "navmenu", version, about)]
struct Cli {
    /// Enable verbose output (resolution logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a menu and print it as JSON.
    Build(BuildArgs),
    /// Resolve a menu and print an indented outline.
    Outline(OutlineArgs),
    /// Check a stored menu tree for errors.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Outline(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
