//! # Error Types
//!
//! Errors raised by the foundational types. Corpus traversal, audit, and
//! mirror errors live next to the code that raises them in `jss-schema`.

use std::path::PathBuf;

use thiserror::Error;

/// Error loading a [`SuiteLayout`](crate::SuiteLayout) configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config '{path}': {source}")]
    Read {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for a suite layout.
    #[error("invalid config '{path}': {reason}")]
    Invalid {
        /// Path to the configuration file.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Error rendering a JSON value as text.
#[derive(Error, Debug)]
pub enum RenderError {
    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The serializer produced bytes that are not UTF-8.
    #[error("rendered JSON is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
