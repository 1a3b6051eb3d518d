//! # jss-schema: Corpus Engine for the Fixture Suite
//!
//! Walks a fixture corpus, flattens it into self-contained test cases, and
//! audits it for consistency.
//!
//! ## Traversal (`corpus`)
//!
//! - [`walk`]: lazily enumerates `*.json` fixtures under a root.
//! - [`load`]: parses one file as generic JSON.
//! - [`flatten`] / [`flatten_dir`]: file → group → case expansion, in
//!   order or as a seeded random permutation.
//!
//! ## Audit (`check`)
//!
//! [`check`] runs every consistency check over a corpus and reports all
//! failures together: JSON syntax, description length and uniqueness,
//! per-draft schema validity (via the pluggable [`DraftRegistry`]), corpus
//! shape conformance, and remote mirror consistency.
//!
//! ## Remote mirror (`materialize`)
//!
//! [`materialize`] writes the remote schema registry to a directory in
//! create or update mode.
//!
//! ## Crate Policy
//!
//! - Depends only on `jss-core` internally.
//! - Only `materialize` writes to the filesystem.
//! - Schema validity is meta-schema validation only; `$ref`s are never
//!   resolved and the network is never touched.

pub mod check;
pub mod corpus;
pub mod draft;
pub mod materialize;
pub mod shape;

pub use check::{check, verify_remotes, CheckOptions, CheckReport, Failure};
pub use corpus::{
    draft_of, flatten, flatten_dir, flatten_randomized, load, load_test_file, walk, CorpusError,
};
pub use draft::{DraftRegistry, DraftValidator, JsonSchemaDraft, BUILTIN_DRAFTS};
pub use materialize::{materialize, MaterializeMode, RegistryError};
pub use shape::{
    corpus_shape_schema, ShapeSchemaError, ShapeValidator, ShapeViolation, ShapeViolations,
};
