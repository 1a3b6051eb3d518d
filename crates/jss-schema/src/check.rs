//! # Corpus Audit
//!
//! [`check`] is the correctness gate over a fixture corpus. It walks every
//! fixture once and runs all of the following, collecting every failure
//! rather than stopping at the first:
//!
//! 1. Each file parses as JSON.
//! 2. Every group and case description is shorter than the limit.
//! 3. Case descriptions are unique within each group.
//! 4. Every schema is valid under the draft named by its top-level
//!    directory, when a capability for that draft is registered. Drafts
//!    without one are skipped with a warning.
//! 5. Each raw file matches the corpus shape schema.
//! 6. The remote mirror, if configured, matches the remote registry.
//!
//! The audit never writes to the filesystem.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use jss_core::{
    description_fits, duplicate_descriptions, RemoteSchemaRegistry, SuiteLayout,
    MAX_DESCRIPTION_LEN,
};
use serde_json::Value;
use thiserror::Error;

use crate::corpus::{self, CorpusError};
use crate::draft::DraftRegistry;
use crate::shape::{ShapeSchemaError, ShapeValidator, ShapeViolations};

/// One audit finding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Failure {
    /// A file or directory could not be read.
    #[error("{}: cannot read: {reason}", path.display())]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying error.
        reason: String,
    },

    /// A fixture file is not well-formed JSON.
    #[error("{}: invalid JSON: {reason}", path.display())]
    Parse {
        /// Path to the fixture file.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// A fixture file does not match the corpus shape.
    #[error("{}: does not match the corpus shape:\n{violations}", path.display())]
    Shape {
        /// Path to the fixture file.
        path: PathBuf,
        /// Every violation found in the file.
        violations: ShapeViolations,
    },

    /// A case's schema is not valid under its draft.
    #[error("{}: case '{case}' in group '{group}' has an invalid {draft} schema {schema}: {reason}", path.display())]
    SchemaValidity {
        /// Path to the fixture file.
        path: PathBuf,
        /// Draft the schema was checked against.
        draft: String,
        /// Owning group description.
        group: String,
        /// Case description.
        case: String,
        /// The rejected schema.
        schema: Value,
        /// Validator diagnostic.
        reason: String,
    },

    /// A group or case description is too long.
    #[error("{}: description is {length} characters (limit {limit}): '{description}'", path.display())]
    DescriptionTooLong {
        /// Path to the fixture file.
        path: PathBuf,
        /// The offending description.
        description: String,
        /// Length in characters.
        length: usize,
        /// Exclusive upper bound.
        limit: usize,
    },

    /// A group repeats one or more case descriptions.
    #[error("{}: group '{group}' has duplicate case descriptions: {}", path.display(), duplicates.join(", "))]
    DuplicateDescription {
        /// Path to the fixture file.
        path: PathBuf,
        /// Description of the offending group.
        group: String,
        /// Each repeated description, once.
        duplicates: Vec<String>,
    },

    /// A remote mirror file is missing or differs from the registry.
    #[error("remote '{path}' does not match the registry: {reason}")]
    RegistryMismatch {
        /// Registry path relative to the mirror directory.
        path: String,
        /// What differs.
        reason: String,
    },
}

impl Failure {
    /// Returns true for description length and uniqueness findings.
    pub fn is_description_error(&self) -> bool {
        matches!(
            self,
            Self::DescriptionTooLong { .. } | Self::DuplicateDescription { .. }
        )
    }

    fn from_corpus_error(error: CorpusError) -> Self {
        match error {
            CorpusError::Parse { path, reason } => Self::Parse { path, reason },
            other => Self::Io {
                path: other.path().to_path_buf(),
                reason: other.to_string(),
            },
        }
    }
}

/// Static tables and limits used by [`check`].
#[derive(Debug)]
pub struct CheckOptions {
    /// Remote schemas the mirror is compared against.
    pub remotes: RemoteSchemaRegistry,
    /// Mirror directory to compare; `None` disables the comparison.
    pub remotes_dir: Option<PathBuf>,
    /// Per-draft validity capabilities.
    pub drafts: DraftRegistry,
    /// Descriptions must be strictly shorter than this.
    pub max_description_len: usize,
}

impl CheckOptions {
    /// Options with the given tables, no mirror comparison, and the default limit.
    pub fn new(remotes: RemoteSchemaRegistry, drafts: DraftRegistry) -> Self {
        Self {
            remotes,
            remotes_dir: None,
            drafts,
            max_description_len: MAX_DESCRIPTION_LEN,
        }
    }

    /// Options for a suite laid out under `root`, with the built-in remote
    /// registry and the built-in draft capabilities.
    pub fn for_layout(root: &Path, layout: &SuiteLayout) -> Self {
        let remotes = RemoteSchemaRegistry::builtin();
        Self::new(remotes, DraftRegistry::with_builtin_drafts())
            .with_remotes_dir(layout.remotes_path(root))
            .with_max_description_len(layout.max_description_len)
    }

    /// Compare the remote mirror at `dir`.
    pub fn with_remotes_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.remotes_dir = Some(dir.into());
        self
    }

    /// Override the description length limit.
    pub fn with_max_description_len(mut self, limit: usize) -> Self {
        self.max_description_len = limit;
        self
    }
}

/// Outcome of [`check`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    /// Number of fixture files that parsed.
    pub files_checked: usize,
    /// Number of cases audited.
    pub cases_checked: usize,
    /// Every failure found.
    pub failures: Vec<Failure>,
    /// Non-fatal diagnostics, such as drafts skipped for lack of a capability.
    pub warnings: Vec<String>,
}

impl CheckReport {
    /// True when no failure was found. Warnings do not count.
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Each failure rendered as a message.
    pub fn failure_messages(&self) -> Vec<String> {
        self.failures.iter().map(ToString::to_string).collect()
    }
}

/// Audit every fixture under `root`.
///
/// # Errors
///
/// Returns `ShapeSchemaError` only if the built-in corpus shape schema
/// fails to compile. Every problem with the corpus itself is a
/// [`Failure`] in the report.
pub fn check(root: &Path, options: &CheckOptions) -> Result<CheckReport, ShapeSchemaError> {
    let shape = ShapeValidator::new()?;
    let mut auditor = Auditor {
        root,
        options,
        shape: &shape,
        skipped_drafts: BTreeSet::new(),
        report: CheckReport::default(),
    };

    for entry in corpus::walk(root) {
        match entry {
            Ok(path) => auditor.audit_file(&path),
            Err(e) => auditor.report.failures.push(Failure::from_corpus_error(e)),
        }
    }

    if let Some(dir) = &options.remotes_dir {
        auditor
            .report
            .failures
            .extend(verify_remotes(&options.remotes, dir));
    }

    let report = auditor.report;
    tracing::info!(
        files = report.files_checked,
        cases = report.cases_checked,
        failures = report.failures.len(),
        warnings = report.warnings.len(),
        "corpus check complete"
    );
    Ok(report)
}

/// Compare each registry entry with its file under `mirror_dir`.
///
/// Returns one [`Failure::RegistryMismatch`] per entry that is missing,
/// unreadable, or not deep-equal to the registry's schema.
pub fn verify_remotes(registry: &RemoteSchemaRegistry, mirror_dir: &Path) -> Vec<Failure> {
    let mut failures = Vec::new();
    for (path, expected) in registry.iter() {
        let file = mirror_dir.join(path);
        let reason = match corpus::load(&file) {
            Ok(actual) if actual == *expected => continue,
            Ok(_) => "contents differ".to_string(),
            Err(CorpusError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                format!("missing file {}", file.display())
            }
            Err(e) => e.to_string(),
        };
        tracing::debug!(path, %reason, "remote mirror mismatch");
        failures.push(Failure::RegistryMismatch {
            path: path.to_string(),
            reason,
        });
    }
    failures
}

struct Auditor<'a> {
    root: &'a Path,
    options: &'a CheckOptions,
    shape: &'a ShapeValidator,
    skipped_drafts: BTreeSet<String>,
    report: CheckReport,
}

impl Auditor<'_> {
    fn audit_file(&mut self, path: &Path) {
        tracing::debug!(path = %path.display(), "checking fixture");

        let value = match corpus::load(path) {
            Ok(value) => value,
            Err(e) => {
                self.report.failures.push(Failure::from_corpus_error(e));
                return;
            }
        };
        self.report.files_checked += 1;

        if let Err(violations) = self.shape.validate(&value) {
            self.report.failures.push(Failure::Shape {
                path: path.to_path_buf(),
                violations,
            });
        }

        let groups: Vec<RawGroup<'_>> = value
            .as_array()
            .map(|items| items.iter().filter_map(RawGroup::from_value).collect())
            .unwrap_or_default();

        let draft = corpus::draft_of(self.root, path);
        for group in &groups {
            self.report.cases_checked += group.cases.len();
            self.check_descriptions(path, group);
            if let Some(draft) = &draft {
                self.check_draft_validity(path, draft, group);
            }
        }
    }

    fn check_descriptions(&mut self, path: &Path, group: &RawGroup<'_>) {
        let limit = self.options.max_description_len;
        let descriptions = group
            .description
            .into_iter()
            .chain(group.cases.iter().flatten().copied());
        for description in descriptions {
            if !description_fits(description, limit) {
                self.report.failures.push(Failure::DescriptionTooLong {
                    path: path.to_path_buf(),
                    description: description.to_string(),
                    length: description.chars().count(),
                    limit,
                });
            }
        }

        let duplicates = duplicate_descriptions(group.cases.iter().flatten().copied());
        if !duplicates.is_empty() {
            self.report.failures.push(Failure::DuplicateDescription {
                path: path.to_path_buf(),
                group: group.name().to_string(),
                duplicates: duplicates.into_iter().map(str::to_string).collect(),
            });
        }
    }

    fn check_draft_validity(&mut self, path: &Path, draft: &str, group: &RawGroup<'_>) {
        let Some(validator) = self.options.drafts.get(draft) else {
            if self.skipped_drafts.insert(draft.to_string()) {
                let message = format!(
                    "no schema validator registered for {draft}; skipping its schema validity check"
                );
                tracing::warn!("{message}");
                self.report.warnings.push(message);
            }
            return;
        };
        let Some(schema) = group.schema else {
            return;
        };

        // Every case carries the group's schema, so one verdict covers them all.
        if let Err(reason) = validator.validate_schema(schema) {
            for (index, case) in group.cases.iter().copied().enumerate() {
                self.report.failures.push(Failure::SchemaValidity {
                    path: path.to_path_buf(),
                    draft: draft.to_string(),
                    group: group.name().to_string(),
                    case: case.map_or_else(|| format!("#{index}"), str::to_string),
                    schema: schema.clone(),
                    reason: reason.clone(),
                });
            }
        }
    }
}

/// The parts of one group the audit reads, borrowed from the raw file.
///
/// Read field by field so that a malformed case leaves the rest of its
/// group auditable; the shape check reports the malformation itself.
struct RawGroup<'v> {
    description: Option<&'v str>,
    schema: Option<&'v Value>,
    /// One entry per case; `None` where the description is missing or not a string.
    cases: Vec<Option<&'v str>>,
}

impl<'v> RawGroup<'v> {
    fn from_value(value: &'v Value) -> Option<Self> {
        let object = value.as_object()?;
        let cases = object
            .get("tests")
            .and_then(Value::as_array)
            .map(|tests| {
                tests
                    .iter()
                    .map(|case| case.get("description").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default();
        Some(Self {
            description: object.get("description").and_then(Value::as_str),
            schema: object.get("schema"),
            cases,
        })
    }

    fn name(&self) -> &'v str {
        self.description.unwrap_or("<unnamed group>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn write_json(path: &Path, value: &Value) {
        write(path, &serde_json::to_string_pretty(value).unwrap());
    }

    fn options() -> CheckOptions {
        CheckOptions::new(
            RemoteSchemaRegistry::builtin(),
            DraftRegistry::with_builtin_drafts(),
        )
    }

    fn basic_file() -> Value {
        json!([{
            "description": "basic",
            "schema": {"type": "integer"},
            "tests": [
                {"description": "an integer is valid", "data": 5, "valid": true},
                {"description": "a string is invalid", "data": "x", "valid": false}
            ]
        }])
    }

    #[test]
    fn clean_corpus_passes() {
        let dir = tempfile::tempdir().unwrap();
        write_json(&dir.path().join("draft4/type.json"), &basic_file());
        let report = check(dir.path(), &options()).unwrap();
        assert!(report.success(), "{:?}", report.failure_messages());
        assert_eq!(report.files_checked, 1);
        assert_eq!(report.cases_checked, 2);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn parse_failure_does_not_stop_other_files() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("draft4/a.json"), "{ nope");
        write_json(&dir.path().join("draft4/b.json"), &basic_file());
        let report = check(dir.path(), &options()).unwrap();
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(&report.failures[0], Failure::Parse { path, .. } if path.ends_with("a.json")));
        assert_eq!(report.files_checked, 1);
    }

    #[test]
    fn long_group_and_case_descriptions_reported() {
        let long = "x".repeat(60);
        let dir = tempfile::tempdir().unwrap();
        write_json(
            &dir.path().join("draft4/long.json"),
            &json!([{
                "description": long,
                "schema": {},
                "tests": [{"description": long, "data": 1, "valid": true}]
            }]),
        );
        let report = check(dir.path(), &options()).unwrap();
        let too_long = report
            .failures
            .iter()
            .filter(|f| matches!(f, Failure::DescriptionTooLong { length: 60, .. }))
            .count();
        assert_eq!(too_long, 2);
    }

    #[test]
    fn missing_draft_capability_warns_once() {
        let dir = tempfile::tempdir().unwrap();
        write_json(&dir.path().join("draft3/a.json"), &basic_file());
        write_json(&dir.path().join("draft3/b.json"), &basic_file());
        let report = check(dir.path(), &options()).unwrap();
        assert!(report.success());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("draft3"));
    }

    #[test]
    fn invalid_schema_reported_per_case() {
        let dir = tempfile::tempdir().unwrap();
        write_json(
            &dir.path().join("draft7/bad.json"),
            &json!([{
                "description": "bad type",
                "schema": {"type": "whole number"},
                "tests": [
                    {"description": "one", "data": 1, "valid": true},
                    {"description": "two", "data": 2, "valid": true}
                ]
            }]),
        );
        let report = check(dir.path(), &options()).unwrap();
        let cases: Vec<&str> = report
            .failures
            .iter()
            .filter_map(|f| match f {
                Failure::SchemaValidity { case, draft, .. } => {
                    assert_eq!(draft, "draft7");
                    Some(case.as_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(cases, vec!["one", "two"]);
    }

    #[test]
    fn shape_failure_names_file_and_still_audits_decodable_groups() {
        let dir = tempfile::tempdir().unwrap();
        write_json(
            &dir.path().join("draft4/extra.json"),
            &json!([{
                "description": "extra key",
                "schema": {},
                "note": "unexpected",
                "tests": [
                    {"description": "dup", "data": 1, "valid": true},
                    {"description": "dup", "data": 2, "valid": true}
                ]
            }]),
        );
        let report = check(dir.path(), &options()).unwrap();
        assert_eq!(report.failures.len(), 2);
        assert!(report
            .failures
            .iter()
            .any(|f| matches!(f, Failure::Shape { path, .. } if path.ends_with("extra.json"))));
        assert!(report.failures.iter().any(Failure::is_description_error));
    }

    #[test]
    fn malformed_case_does_not_hide_its_group_from_other_checks() {
        let long = "y".repeat(70);
        let dir = tempfile::tempdir().unwrap();
        write_json(
            &dir.path().join("draft7/mixed.json"),
            &json!([{
                "description": "one bad case among good ones",
                "schema": {"minLength": -1},
                "tests": [
                    {"description": "dup", "data": 1, "valid": true},
                    {"description": "dup", "data": 2, "valid": true},
                    {"description": long, "data": 3, "valid": true},
                    {"description": "stringly valid", "data": 4, "valid": "yes"},
                    {"data": 5, "valid": true}
                ]
            }]),
        );
        let report = check(dir.path(), &options()).unwrap();
        assert_eq!(report.cases_checked, 5);

        let count = |pred: fn(&Failure) -> bool| report.failures.iter().filter(|f| pred(f)).count();
        assert_eq!(count(|f| matches!(f, Failure::Shape { .. })), 1);
        assert_eq!(count(|f| matches!(f, Failure::DescriptionTooLong { length: 70, .. })), 1);
        assert_eq!(
            count(|f| matches!(f, Failure::DuplicateDescription { duplicates, .. } if duplicates == &["dup"])),
            1
        );
        let cases: Vec<&str> = report
            .failures
            .iter()
            .filter_map(|f| match f {
                Failure::SchemaValidity { case, .. } => Some(case.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(cases, vec!["dup", "dup", long.as_str(), "stringly valid", "#4"]);
    }

    #[test]
    fn dangling_local_ref_passes_schema_validity() {
        let dir = tempfile::tempdir().unwrap();
        write_json(
            &dir.path().join("draft7/ref.json"),
            &json!([{
                "description": "dangling local ref",
                "schema": {"$ref": "#/definitions/missing"},
                "tests": [{"description": "anything", "data": 1, "valid": true}]
            }]),
        );
        let report = check(dir.path(), &options()).unwrap();
        assert!(report.success(), "{:?}", report.failure_messages());
    }

    #[test]
    fn mirror_comparison_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        write_json(&dir.path().join("tests/draft4/type.json"), &basic_file());
        let tests = dir.path().join("tests");

        let without = check(&tests, &options()).unwrap();
        assert!(without.success());

        let with = check(&tests, &options().with_remotes_dir(dir.path().join("remotes"))).unwrap();
        assert_eq!(with.failures.len(), 3);
        assert!(with
            .failures
            .iter()
            .all(|f| matches!(f, Failure::RegistryMismatch { .. })));
    }

    #[test]
    fn verify_remotes_detects_differing_contents() {
        let dir = tempfile::tempdir().unwrap();
        let registry = RemoteSchemaRegistry::new([("a.json", json!({"type": "integer"}))]);
        write_json(&dir.path().join("a.json"), &json!({"type": "string"}));
        let failures = verify_remotes(&registry, dir.path());
        assert_eq!(
            failures,
            vec![Failure::RegistryMismatch {
                path: "a.json".to_string(),
                reason: "contents differ".to_string(),
            }]
        );
    }

    #[test]
    fn verify_remotes_ignores_formatting() {
        let dir = tempfile::tempdir().unwrap();
        let registry = RemoteSchemaRegistry::new([("a.json", json!({"a": 1, "b": [true]}))]);
        write(&dir.path().join("a.json"), "{\"b\":[true],\n\n  \"a\":1}");
        assert!(verify_remotes(&registry, dir.path()).is_empty());
    }

    #[test]
    fn custom_description_limit() {
        let dir = tempfile::tempdir().unwrap();
        write_json(&dir.path().join("draft4/type.json"), &basic_file());
        let report = check(dir.path(), &options().with_max_description_len(10)).unwrap();
        // "an integer is valid" and "a string is invalid" exceed 10 characters.
        assert_eq!(report.failures.len(), 2);
    }
}
