//! # Fixture Data Model
//!
//! A fixture file holds an array of [`TestGroup`]s. Each group pairs one
//! schema with the instances that should or should not satisfy it. The
//! flattener turns groups into [`TestCase`]s, each stamped with a copy of
//! its group's schema.
//!
//! Decoding is deliberately lenient: unknown keys are ignored and a missing
//! `data` decodes as `null`. Strict shape enforcement is the job of the
//! corpus-shape schema in `jss-schema`, which reports every violation
//! instead of stopping at the first.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Descriptions must be strictly shorter than this many characters.
pub const MAX_DESCRIPTION_LEN: usize = 60;

/// The decoded contents of one fixture file.
pub type TestFile = Vec<TestGroup>;

/// A schema together with the instances tested against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestGroup {
    /// Human-readable summary of what the group exercises.
    pub description: String,
    /// The schema under test, interpreted under the draft of the owning directory.
    pub schema: Value,
    /// The instances tested against `schema`, in declaration order.
    pub tests: Vec<GroupCase>,
}

/// A single instance as declared inside a [`TestGroup`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupCase {
    /// Human-readable summary of the instance.
    pub description: String,
    /// The instance to validate.
    #[serde(default)]
    pub data: Value,
    /// Whether `data` is expected to satisfy the group's schema.
    pub valid: bool,
}

/// A self-contained test case produced by flattening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub description: String,
    pub data: Value,
    pub valid: bool,
    /// Copy of the owning group's schema.
    pub schema: Value,
}

impl TestGroup {
    /// Consume the group, yielding each case stamped with the group's schema.
    pub fn into_cases(self) -> impl Iterator<Item = TestCase> {
        let schema = self.schema;
        self.tests.into_iter().map(move |case| TestCase {
            description: case.description,
            data: case.data,
            valid: case.valid,
            schema: schema.clone(),
        })
    }

    /// Case descriptions that appear more than once, sorted and deduplicated.
    pub fn duplicate_descriptions(&self) -> Vec<&str> {
        duplicate_descriptions(self.tests.iter().map(|c| c.description.as_str()))
    }

    /// Returns true if the case descriptions are pairwise distinct.
    pub fn has_unique_descriptions(&self) -> bool {
        let distinct: BTreeSet<&str> = self.tests.iter().map(|c| c.description.as_str()).collect();
        distinct.len() == self.tests.len()
    }
}

/// Descriptions that appear more than once in `descriptions`, sorted and
/// deduplicated.
pub fn duplicate_descriptions<'a>(descriptions: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for description in descriptions {
        if !seen.insert(description) {
            duplicates.insert(description);
        }
    }
    duplicates.into_iter().collect()
}

/// Returns true if `description` is short enough for a report line.
///
/// Length is counted in Unicode scalar values, not bytes.
pub fn description_fits(description: &str, max_len: usize) -> bool {
    description.chars().count() < max_len
}
