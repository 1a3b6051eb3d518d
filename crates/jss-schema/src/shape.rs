//! # Corpus Shape Conformance
//!
//! Every fixture file must be a non-empty array of group objects, each
//! with a non-empty string `description`, a `schema` of any type, and a
//! non-empty `tests` array of case objects. Each case carries a string
//! `description`, a `data` of any type, and a boolean `valid`. No other
//! keys are allowed at either level.
//!
//! The shape is itself a JSON Schema (draft 7), compiled once and applied
//! to each raw file value. All violations in a file are collected, not
//! just the first.

use std::fmt;

use jsonschema::{Draft, Validator};
use serde_json::{json, Value};
use thiserror::Error;

/// The fixed schema every fixture file must satisfy.
pub fn corpus_shape_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "array",
        "minItems": 1,
        "items": {
            "type": "object",
            "required": ["description", "schema", "tests"],
            "properties": {
                "description": {"type": "string", "minLength": 1},
                "schema": {},
                "tests": {
                    "type": "array",
                    "minItems": 1,
                    "items": {
                        "type": "object",
                        "required": ["description", "data", "valid"],
                        "properties": {
                            "description": {"type": "string"},
                            "data": {},
                            "valid": {"type": "boolean"}
                        },
                        "additionalProperties": false
                    }
                }
            },
            "additionalProperties": false
        }
    })
}

/// The corpus-shape schema failed to compile.
#[derive(Error, Debug)]
#[error("corpus shape schema failed to compile: {reason}")]
pub struct ShapeSchemaError {
    /// Compiler diagnostic.
    pub reason: String,
}

/// One place where a fixture file departs from the corpus shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeViolation {
    /// JSON Pointer to the offending value; empty for the file root.
    pub pointer: String,
    pub message: String,
}

impl fmt::Display for ShapeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = if self.pointer.is_empty() { "(root)" } else { &self.pointer };
        write!(f, "  {at}: {}", self.message)
    }
}

/// Every shape violation found in one file, in validator order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeViolations(pub Vec<ShapeViolation>);

impl ShapeViolations {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pointers of every violation.
    pub fn pointers(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|v| v.pointer.as_str())
    }
}

impl fmt::Display for ShapeViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&lines.join("\n"))
    }
}

/// Compiled validator for the corpus shape.
pub struct ShapeValidator {
    validator: Validator,
}

impl fmt::Debug for ShapeValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeValidator").finish_non_exhaustive()
    }
}

impl ShapeValidator {
    /// Compile [`corpus_shape_schema`].
    pub fn new() -> Result<Self, ShapeSchemaError> {
        let mut opts = jsonschema::options();
        opts.with_draft(Draft::Draft7);
        let validator = opts
            .build(&corpus_shape_schema())
            .map_err(|e| ShapeSchemaError {
                reason: e.to_string(),
            })?;
        Ok(Self { validator })
    }

    /// Collect every shape violation in a raw fixture value.
    pub fn violations(&self, instance: &Value) -> ShapeViolations {
        ShapeViolations(
            self.validator
                .iter_errors(instance)
                .map(|e| ShapeViolation {
                    pointer: e.instance_path.to_string(),
                    message: e.to_string(),
                })
                .collect(),
        )
    }

    /// Validate a raw fixture value, returning its violations on failure.
    pub fn validate(&self, instance: &Value) -> Result<(), ShapeViolations> {
        let violations = self.violations(instance);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape() -> ShapeValidator {
        ShapeValidator::new().unwrap()
    }

    #[test]
    fn accepts_well_formed_file() {
        let file = json!([{
            "description": "basic",
            "schema": {"type": "integer"},
            "tests": [
                {"description": "an integer is valid", "data": 5, "valid": true},
                {"description": "null data is allowed", "data": null, "valid": false}
            ]
        }]);
        shape().validate(&file).unwrap();
    }

    #[test]
    fn schema_may_be_any_type() {
        let file = json!([{
            "description": "boolean schema",
            "schema": false,
            "tests": [{"description": "anything", "data": 1, "valid": false}]
        }]);
        shape().validate(&file).unwrap();
    }

    #[test]
    fn rejects_empty_file_and_empty_tests() {
        assert!(shape().validate(&json!([])).is_err());
        let file = json!([{"description": "empty", "schema": {}, "tests": []}]);
        assert!(shape().validate(&file).is_err());
    }

    #[test]
    fn rejects_non_array_root() {
        let violations = shape().validate(&json!({"description": "x"})).unwrap_err();
        assert_eq!(violations.0[0].pointer, "");
        assert!(violations.to_string().contains("(root)"));
    }

    #[test]
    fn rejects_additional_properties_at_both_levels() {
        let file = json!([{
            "description": "extra",
            "schema": {},
            "comment": "not allowed",
            "tests": [{"description": "x", "data": 1, "valid": true, "note": "nope"}]
        }]);
        let violations = shape().validate(&file).unwrap_err();
        assert_eq!(violations.len(), 2);
        let paths: Vec<&str> = violations.pointers().collect();
        assert!(paths.contains(&"/0"));
        assert!(paths.contains(&"/0/tests/0"));
    }

    #[test]
    fn rejects_missing_data_and_non_boolean_valid() {
        let file = json!([{
            "description": "bad case",
            "schema": {},
            "tests": [{"description": "x", "valid": "yes"}]
        }]);
        let violations = shape().validate(&file).unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn rejects_empty_group_description() {
        let file = json!([{
            "description": "",
            "schema": {},
            "tests": [{"description": "x", "data": 1, "valid": true}]
        }]);
        assert!(shape().validate(&file).is_err());
    }
}
