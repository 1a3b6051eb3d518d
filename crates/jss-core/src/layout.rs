//! # Suite Layout Configuration
//!
//! Where the suite keeps its fixtures and its remote mirror, relative to a
//! suite root. The defaults match the conventional layout:
//!
//! ```text
//! <root>/
//!   tests/<draft>/**/*.json   fixture files
//!   remotes/                  mirror of the remote schema registry
//! ```
//!
//! A YAML file may override any field; omitted fields keep their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::MAX_DESCRIPTION_LEN;

/// Directory layout and limits for one fixture suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuiteLayout {
    /// Directory holding one subdirectory per draft.
    pub tests_dir: PathBuf,
    /// Directory holding the remote schema mirror.
    pub remotes_dir: PathBuf,
    /// Descriptions must be strictly shorter than this.
    pub max_description_len: usize,
}

impl Default for SuiteLayout {
    fn default() -> Self {
        Self {
            tests_dir: PathBuf::from("tests"),
            remotes_dir: PathBuf::from("remotes"),
            max_description_len: MAX_DESCRIPTION_LEN,
        }
    }
}

impl SuiteLayout {
    /// Load a layout from a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|e| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Parse a layout from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Absolute (or root-relative) path of the fixtures directory.
    pub fn tests_path(&self, root: &Path) -> PathBuf {
        root.join(&self.tests_dir)
    }

    /// Absolute (or root-relative) path of the remote mirror.
    pub fn remotes_path(&self, root: &Path) -> PathBuf {
        root.join(&self.remotes_dir)
    }

    /// Fixture directory for a single draft.
    pub fn draft_path(&self, root: &Path, draft: &str) -> PathBuf {
        self.tests_path(root).join(draft)
    }
}
