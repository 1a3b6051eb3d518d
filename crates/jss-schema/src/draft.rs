//! # Per-Draft Schema Validity
//!
//! Each subdirectory of the fixture root is named after a schema draft,
//! and every schema under it should be a well-formed schema for that
//! draft. Checking this is delegated to a [`DraftValidator`] capability
//! looked up by directory name in a [`DraftRegistry`].
//!
//! A draft with no registered capability is not an error: the audit skips
//! it and records a warning.
//!
//! The `jsonschema`-backed capability only checks a schema against its
//! draft's meta-schema. It does not compile the schema, so `$ref` targets
//! are never resolved and the network is never touched.

use std::collections::BTreeMap;
use std::fmt;

use jsonschema::Draft;
use serde_json::Value;

/// Checks that a value is a well-formed schema for one draft.
pub trait DraftValidator: Send + Sync {
    /// Returns a descriptive error if `schema` is not a valid schema.
    fn validate_schema(&self, schema: &Value) -> Result<(), String>;
}

impl<F> DraftValidator for F
where
    F: Fn(&Value) -> Result<(), String> + Send + Sync,
{
    fn validate_schema(&self, schema: &Value) -> Result<(), String> {
        self(schema)
    }
}

/// Draft directory names with a built-in `jsonschema` capability.
pub const BUILTIN_DRAFTS: &[(&str, Draft)] = &[
    ("draft4", Draft::Draft4),
    ("draft6", Draft::Draft6),
    ("draft7", Draft::Draft7),
    ("draft2019-09", Draft::Draft201909),
    ("draft2020-12", Draft::Draft202012),
];

/// Lookup from draft name to validation capability.
#[derive(Default)]
pub struct DraftRegistry {
    validators: BTreeMap<String, Box<dyn DraftValidator>>,
}

impl DraftRegistry {
    /// An empty registry: every draft is skipped.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every draft in [`BUILTIN_DRAFTS`].
    pub fn with_builtin_drafts() -> Self {
        let mut registry = Self::new();
        for (name, draft) in BUILTIN_DRAFTS {
            registry.register(*name, JsonSchemaDraft::new(*draft));
        }
        registry
    }

    /// Register (or replace) the capability for `draft`.
    pub fn register(&mut self, draft: impl Into<String>, validator: impl DraftValidator + 'static) {
        self.validators.insert(draft.into(), Box::new(validator));
    }

    /// Look up the capability for `draft`.
    pub fn get(&self, draft: &str) -> Option<&dyn DraftValidator> {
        self.validators.get(draft).map(|v| v.as_ref())
    }

    /// Names of all registered drafts, sorted.
    pub fn drafts(&self) -> Vec<&str> {
        self.validators.keys().map(String::as_str).collect()
    }
}

impl fmt::Debug for DraftRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraftRegistry")
            .field("drafts", &self.drafts())
            .finish()
    }
}

/// A [`DraftValidator`] backed by the `jsonschema` crate's bundled
/// meta-schemas.
#[derive(Debug, Clone, Copy)]
pub struct JsonSchemaDraft {
    draft: Draft,
}

impl JsonSchemaDraft {
    /// Create a validator for `draft`.
    pub fn new(draft: Draft) -> Self {
        Self { draft }
    }
}

impl DraftValidator for JsonSchemaDraft {
    fn validate_schema(&self, schema: &Value) -> Result<(), String> {
        let result = match self.draft {
            Draft::Draft4 => jsonschema::draft4::meta::validate(schema),
            Draft::Draft6 => jsonschema::draft6::meta::validate(schema),
            Draft::Draft7 => jsonschema::draft7::meta::validate(schema),
            Draft::Draft201909 => jsonschema::draft201909::meta::validate(schema),
            Draft::Draft202012 => jsonschema::draft202012::meta::validate(schema),
            _ => jsonschema::meta::validate(schema),
        };
        result.map_err(|e| e.to_string())
    }
}
