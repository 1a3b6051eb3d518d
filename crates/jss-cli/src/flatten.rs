//! # Flatten Subcommand
//!
//! Prints every case of one draft as a JSON array of self-contained
//! `{description, data, valid, schema}` objects, for consumption by
//! validator test harnesses.

use anyhow::{Context, Result};
use clap::Args;

use crate::Suite;

/// Arguments for the flatten subcommand.
#[derive(Args, Debug)]
pub struct FlattenArgs {
    /// Draft directory to flatten (e.g., draft4).
    pub draft: String,

    /// Emit cases in random order.
    #[arg(long)]
    pub randomize: bool,

    /// Seed for --randomize, for a reproducible order.
    #[arg(long, requires = "randomize")]
    pub seed: Option<u64>,
}

/// Execute the flatten subcommand.
pub fn run_flatten(args: &FlattenArgs, suite: &Suite) -> Result<u8> {
    let dir = suite.layout.draft_path(&suite.root, &args.draft);
    let cases = jss_schema::flatten_dir(&dir, args.randomize, args.seed)
        .with_context(|| format!("failed to flatten {}", dir.display()))?;
    tracing::info!(draft = %args.draft, cases = cases.len(), "flattened draft");

    let rendered = serde_json::to_string_pretty(&cases).context("failed to serialize cases")?;
    println!("{rendered}");
    Ok(0)
}
