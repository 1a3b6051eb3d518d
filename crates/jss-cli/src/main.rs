//! # jss CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jss_cli::check::{run_check, CheckArgs};
use jss_cli::flatten::{run_flatten, FlattenArgs};
use jss_cli::remotes::{run_dump_remotes, run_remotes, DumpRemotesArgs};
use jss_cli::Suite;

/// JSON Schema fixture suite toolchain.
///
/// Audits the fixture corpus, flattens it for validator harnesses, and
/// manages the mirror of remote reference schemas.
#[derive(Parser, Debug)]
#[command(name = "jss", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suite root directory. Defaults to the nearest ancestor with a `tests/` directory.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Path to a YAML layout file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check the corpus and the remote mirror for consistency.
    Check(CheckArgs),

    /// Print a draft's cases as one flat JSON array.
    Flatten(FlattenArgs),

    /// Print the remote schema registry as JSON.
    Remotes,

    /// Write the remote schema registry to the mirror directory.
    DumpRemotes(DumpRemotesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let suite = || Suite::resolve(cli.root.as_deref(), cli.config.as_deref());

    let result = match cli.command {
        Commands::Check(args) => suite().and_then(|suite| run_check(&args, &suite)),
        Commands::Flatten(args) => suite().and_then(|suite| run_flatten(&args, &suite)),
        Commands::Remotes => run_remotes(),
        Commands::DumpRemotes(args) => suite().and_then(|suite| run_dump_remotes(&args, &suite)),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
