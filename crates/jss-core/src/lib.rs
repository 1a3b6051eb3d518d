//! # jss-core: Foundational Types for the Fixture Suite
//!
//! Defines the data model shared by every other crate in the workspace:
//! the three-level fixture hierarchy (file → group → case), the static
//! table of remote reference schemas, the suite directory layout, and the
//! sorted/indented JSON rendering used whenever the suite writes JSON.
//!
//! ## Key Design Principles
//!
//! 1. **Self-contained cases.** A [`TestCase`] carries its own copy of the
//!    owning group's schema, so a flattened case can be validated without
//!    a reference back to its group.
//!
//! 2. **Immutable static tables.** [`RemoteSchemaRegistry`] is built once by
//!    a constructor and passed by reference. There are no mutable globals.
//!
//! 3. **One rendering path.** Everything the suite writes to disk or stdout
//!    goes through [`render::to_sorted_pretty_string`], so the on-disk mirror
//!    and the `remotes` command agree byte-for-byte.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jss-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod layout;
pub mod model;
pub mod registry;
pub mod render;

pub use error::{ConfigError, RenderError};
pub use layout::SuiteLayout;
pub use model::{
    description_fits, duplicate_descriptions, GroupCase, TestCase, TestFile, TestGroup,
    MAX_DESCRIPTION_LEN,
};
pub use registry::{RemoteSchemaRegistry, REMOTE_BASE_URL};
pub use render::{sorted, to_sorted_pretty_string};
