//! # jss-cli: Fixture Suite Command-Line Interface
//!
//! Thin glue over `jss-schema`. Every handler resolves paths from the
//! [`Suite`] context, calls one library operation, and prints the result.
//!
//! ## Subcommands
//!
//! - `jss check`: audit the whole corpus and the remote mirror.
//! - `jss flatten <draft>`: print a draft's cases as a flat JSON array.
//! - `jss remotes`: print the remote schema registry.
//! - `jss dump-remotes`: write the registry to the mirror directory.
//!
//! ```bash
//! jss check
//! jss flatten draft4 --randomize --seed 42
//! jss dump-remotes --update
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Command output goes to stdout; logs go to stderr.

pub mod check;
pub mod flatten;
pub mod remotes;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jss_core::SuiteLayout;

/// Resolved suite root and layout shared by every handler.
#[derive(Debug, Clone)]
pub struct Suite {
    /// Directory the layout paths are relative to.
    pub root: PathBuf,
    /// Directory layout and limits.
    pub layout: SuiteLayout,
}

impl Suite {
    /// Build the suite context from the global `--root` and `--config` flags.
    ///
    /// Without `--root`, the root is found by walking up from the current
    /// directory. Without `--config`, a `jss.yaml` in the root is used if
    /// present, otherwise the default layout.
    pub fn resolve(root: Option<&Path>, config: Option<&Path>) -> Result<Self> {
        let root = match root {
            Some(root) => root.to_path_buf(),
            None => {
                let cwd = std::env::current_dir().context("cannot determine current directory")?;
                find_suite_root(&cwd).unwrap_or_else(|| {
                    tracing::warn!("could not locate suite root; using current directory");
                    cwd
                })
            }
        };

        let default_config = root.join(CONFIG_FILE_NAME);
        let config = match config {
            Some(path) => Some(path.to_path_buf()),
            None if default_config.is_file() => Some(default_config),
            None => None,
        };

        let layout = match &config {
            Some(path) => SuiteLayout::from_yaml_file(path)?,
            None => SuiteLayout::default(),
        };
        tracing::debug!(root = %root.display(), ?layout, "resolved suite");
        Ok(Self { root, layout })
    }

    /// Fixtures directory.
    pub fn tests_path(&self) -> PathBuf {
        self.layout.tests_path(&self.root)
    }

    /// Remote mirror directory.
    pub fn remotes_path(&self) -> PathBuf {
        self.layout.remotes_path(&self.root)
    }
}

/// Name of the optional layout file at the suite root.
pub const CONFIG_FILE_NAME: &str = "jss.yaml";

/// Walk up from `start` to the first directory containing `tests/`.
pub fn find_suite_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join("tests").is_dir() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}
