//! # Remote Schema Subcommands
//!
//! `remotes` prints the built-in registry; `dump-remotes` writes it to the
//! mirror directory so a static file server can host it on
//! `http://localhost:1234/`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use jss_core::{to_sorted_pretty_string, RemoteSchemaRegistry};
use jss_schema::{materialize, MaterializeMode};

use crate::Suite;

/// Arguments for the dump-remotes subcommand.
#[derive(Args, Debug)]
pub struct DumpRemotesArgs {
    /// Replace an existing mirror instead of refusing to overwrite it.
    #[arg(long)]
    pub update: bool,

    /// Directory to write to. Defaults to the suite's remotes directory.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

/// Execute the remotes subcommand.
pub fn run_remotes() -> Result<u8> {
    let registry = RemoteSchemaRegistry::builtin();
    let rendered =
        to_sorted_pretty_string(&registry.to_json()).context("failed to render remotes")?;
    print!("{rendered}");
    Ok(0)
}

/// Execute the dump-remotes subcommand.
pub fn run_dump_remotes(args: &DumpRemotesArgs, suite: &Suite) -> Result<u8> {
    let out_dir = args.out_dir.clone().unwrap_or_else(|| suite.remotes_path());
    let mode = if args.update {
        MaterializeMode::Update
    } else {
        MaterializeMode::Create
    };

    let registry = RemoteSchemaRegistry::builtin();
    materialize(&registry, &out_dir, mode)
        .with_context(|| format!("failed to write remotes to {}", out_dir.display()))?;

    println!("wrote {} remote schemas to {}", registry.len(), out_dir.display());
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suite_at(root: &std::path::Path) -> Suite {
        Suite::resolve(Some(root), None).unwrap()
    }

    #[test]
    fn dump_remotes_defaults_to_suite_mirror() {
        let dir = tempfile::tempdir().unwrap();
        let suite = suite_at(dir.path());
        let args = DumpRemotesArgs {
            update: false,
            out_dir: None,
        };
        assert_eq!(run_dump_remotes(&args, &suite).unwrap(), 0);
        assert!(dir.path().join("remotes/subSchemas.json").is_file());

        // A second create onto the same directory is refused.
        assert!(run_dump_remotes(&args, &suite).is_err());

        let update = DumpRemotesArgs {
            update: true,
            out_dir: None,
        };
        assert_eq!(run_dump_remotes(&update, &suite).unwrap(), 0);
    }

    #[test]
    fn dump_remotes_honors_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let suite = suite_at(dir.path());
        let out = dir.path().join("elsewhere");
        let args = DumpRemotesArgs {
            update: false,
            out_dir: Some(out.clone()),
        };
        run_dump_remotes(&args, &suite).unwrap();
        assert!(out.join("folder/folderInteger.json").is_file());
        assert!(!dir.path().join("remotes").exists());
    }
}
