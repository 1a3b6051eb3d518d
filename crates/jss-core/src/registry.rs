//! # Remote Reference Schemas
//!
//! Some fixtures reference schemas hosted on a synthetic origin
//! (`http://localhost:1234/`). The [`RemoteSchemaRegistry`] is the ground
//! truth for those documents: the suite checks its on-disk mirror against
//! this table and regenerates the mirror from it.
//!
//! The table is immutable once built. Callers construct it with
//! [`RemoteSchemaRegistry::builtin`] (or from explicit entries in tests)
//! and pass it by reference.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};

/// Origin under which fixtures reference remote schemas.
pub const REMOTE_BASE_URL: &str = "http://localhost:1234/";

/// Mapping from a relative URL path to the schema served at that path.
///
/// Entries are kept sorted by path so iteration and serialization are
/// deterministic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RemoteSchemaRegistry {
    schemas: BTreeMap<String, Value>,
}

impl RemoteSchemaRegistry {
    /// Build a registry from explicit `(path, schema)` entries.
    pub fn new<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, Value)>,
        P: Into<String>,
    {
        Self {
            schemas: entries.into_iter().map(|(p, v)| (p.into(), v)).collect(),
        }
    }

    /// The remote schemas referenced by the suite's `$ref` fixtures.
    pub fn builtin() -> Self {
        Self::new([
            ("integer.json", json!({"type": "integer"})),
            (
                "subSchemas.json",
                json!({
                    "integer": {"type": "integer"},
                    "refToInteger": {"$ref": "#/integer"}
                }),
            ),
            ("folder/folderInteger.json", json!({"type": "integer"})),
        ])
    }

    /// Look up a schema by its relative path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.schemas.get(path)
    }

    /// Resolve an absolute URL under [`REMOTE_BASE_URL`].
    ///
    /// Any fragment is ignored; the whole document is returned.
    pub fn resolve_url(&self, url: &str) -> Option<&Value> {
        let without_fragment = url.split('#').next().unwrap_or(url);
        let path = without_fragment.strip_prefix(REMOTE_BASE_URL)?;
        self.get(path)
    }

    /// Iterate over `(path, schema)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schemas.iter().map(|(p, v)| (p.as_str(), v))
    }

    /// Returns the number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if no schemas are registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// The registry as a single JSON object keyed by path.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.schemas
                .iter()
                .map(|(p, v)| (p.clone(), v.clone()))
                .collect(),
        )
    }
}

impl Default for RemoteSchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
