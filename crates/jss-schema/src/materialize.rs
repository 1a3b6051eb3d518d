//! # Remote Mirror Materialization
//!
//! Writes the [`RemoteSchemaRegistry`] to disk so a plain file server can
//! serve each remote schema at its registry path. This is the only part of
//! the suite that writes to the filesystem.

use std::path::{Path, PathBuf};

use jss_core::{to_sorted_pretty_string, RemoteSchemaRegistry, RenderError};
use thiserror::Error;

/// How to treat an existing output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterializeMode {
    /// Fail if the output directory already exists.
    Create,
    /// Remove the output directory first, if present.
    Update,
}

/// Error writing the remote mirror.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// `Create` mode was asked to write into an existing directory.
    #[error("'{}' already exists; use update mode to replace it", path.display())]
    TargetExists {
        /// The existing output directory.
        path: PathBuf,
    },

    /// A filesystem operation failed.
    #[error("io error at '{}': {source}", path.display())]
    Io {
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A schema could not be rendered as JSON.
    #[error("cannot render '{path}': {source}")]
    Render {
        /// Registry path of the schema.
        path: String,
        /// Underlying rendering error.
        #[source]
        source: RenderError,
    },
}

/// Write every registry entry under `out_dir`.
///
/// In [`MaterializeMode::Create`] an existing `out_dir` is an error and
/// nothing is touched. In [`MaterializeMode::Update`] any existing tree at
/// `out_dir` is removed first. Each schema is written as sorted,
/// four-space-indented JSON at its registry path, creating parent
/// directories as needed.
pub fn materialize(
    registry: &RemoteSchemaRegistry,
    out_dir: &Path,
    mode: MaterializeMode,
) -> Result<(), RegistryError> {
    if mode == MaterializeMode::Update {
        remove_tree(out_dir)?;
    }

    match std::fs::symlink_metadata(out_dir) {
        Ok(_) => {
            return Err(RegistryError::TargetExists {
                path: out_dir.to_path_buf(),
            })
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(RegistryError::Io {
                path: out_dir.to_path_buf(),
                source,
            })
        }
    }
    create_dir_all(out_dir)?;

    for (path, schema) in registry.iter() {
        let target = out_dir.join(path);
        if let Some(parent) = target.parent() {
            create_dir_all(parent)?;
        }
        let rendered = to_sorted_pretty_string(schema).map_err(|source| RegistryError::Render {
            path: path.to_string(),
            source,
        })?;
        std::fs::write(&target, rendered).map_err(|source| RegistryError::Io {
            path: target.clone(),
            source,
        })?;
        tracing::debug!(path = %target.display(), "wrote remote schema");
    }

    tracing::info!(
        out_dir = %out_dir.display(),
        count = registry.len(),
        "materialized remote schemas"
    );
    Ok(())
}

fn remove_tree(dir: &Path) -> Result<(), RegistryError> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => {
            tracing::debug!(dir = %dir.display(), "removed existing remote mirror");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(RegistryError::Io {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

fn create_dir_all(dir: &Path) -> Result<(), RegistryError> {
    std::fs::create_dir_all(dir).map_err(|source| RegistryError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_writes_sorted_indented_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("remotes");
        materialize(&RemoteSchemaRegistry::builtin(), &out, MaterializeMode::Create).unwrap();

        let nested = std::fs::read_to_string(out.join("folder/folderInteger.json")).unwrap();
        assert_eq!(nested, "{\n    \"type\": \"integer\"\n}\n");

        let sub = std::fs::read_to_string(out.join("subSchemas.json")).unwrap();
        assert!(sub.find("\"integer\"").unwrap() < sub.find("\"refToInteger\"").unwrap());
    }

    #[test]
    fn create_refuses_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sentinel = dir.path().join("keep.txt");
        std::fs::write(&sentinel, "untouched").unwrap();

        let err = materialize(
            &RemoteSchemaRegistry::builtin(),
            dir.path(),
            MaterializeMode::Create,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::TargetExists { .. }));
        assert_eq!(std::fs::read_to_string(&sentinel).unwrap(), "untouched");
        assert!(!dir.path().join("integer.json").exists());
    }

    #[test]
    fn update_replaces_stale_contents() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("remotes");
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("stale.json"), "{}").unwrap();

        let registry = RemoteSchemaRegistry::new([("fresh.json", json!({"b": 2, "a": 1}))]);
        materialize(&registry, &out, MaterializeMode::Update).unwrap();
        assert!(!out.join("stale.json").exists());
        assert_eq!(
            std::fs::read_to_string(out.join("fresh.json")).unwrap(),
            "{\n    \"a\": 1,\n    \"b\": 2\n}\n"
        );
    }

    #[test]
    fn update_on_missing_directory_creates_it() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("a/b/remotes");
        materialize(&RemoteSchemaRegistry::builtin(), &out, MaterializeMode::Update).unwrap();
        assert!(out.join("integer.json").is_file());
    }
}
