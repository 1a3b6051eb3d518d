//! # Check Subcommand
//!
//! Audits the fixture corpus and the remote mirror. Exits 1 if any check
//! fails; warnings (such as drafts without a validator) are printed but
//! never change the exit code.

use anyhow::Result;
use clap::Args;
use jss_schema::CheckOptions;

use crate::Suite;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Skip comparing the remote mirror with the registry.
    #[arg(long)]
    pub skip_remotes: bool,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs, suite: &Suite) -> Result<u8> {
    let mut options = CheckOptions::for_layout(&suite.root, &suite.layout);
    if args.skip_remotes {
        options.remotes_dir = None;
    }

    let report = jss_schema::check(&suite.tests_path(), &options)?;

    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    for failure in &report.failures {
        println!("FAIL {failure}");
    }
    println!();
    println!(
        "{} files, {} cases, {} failures",
        report.files_checked,
        report.cases_checked,
        report.failures.len()
    );

    Ok(if report.success() { 0 } else { 1 })
}
