//! # Corpus Traversal
//!
//! Streaming access to a fixture corpus:
//!
//! - [`walk`] enumerates `*.json` fixture paths under a root.
//! - [`load`] reads and parses one file as a generic JSON value.
//! - [`flatten`] expands file → group → case into one ordered sequence of
//!   self-contained [`TestCase`]s.
//!
//! All three are lazy. A file is only opened when the flattener's consumer
//! pulls a case from it, so the whole corpus never has to sit in memory.
//! Only [`flatten_randomized`] buffers, since a permutation needs every
//! element up front.

use std::path::{Path, PathBuf};

use jss_core::{TestCase, TestFile, TestGroup};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde_json::Value;
use thiserror::Error;
use walkdir::WalkDir;

/// File extension identifying fixture files.
pub const FIXTURE_EXTENSION: &str = "json";

/// Error while traversing or decoding the corpus.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// A directory could not be listed during traversal.
    #[error("cannot walk '{}': {source}", path.display())]
    Walk {
        /// Path at which traversal failed.
        path: PathBuf,
        /// Underlying traversal error.
        #[source]
        source: walkdir::Error,
    },

    /// A fixture file could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        /// Path to the file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A fixture file is not well-formed JSON.
    #[error("invalid JSON in '{}': {reason}", path.display())]
    Parse {
        /// Path to the file.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// A fixture file is valid JSON but not an array of test groups.
    #[error("'{}' is not an array of test groups: {reason}", path.display())]
    Shape {
        /// Path to the file.
        path: PathBuf,
        /// Decoder diagnostic.
        reason: String,
    },
}

impl CorpusError {
    /// The path the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Walk { path, .. }
            | Self::Io { path, .. }
            | Self::Parse { path, .. }
            | Self::Shape { path, .. } => path,
        }
    }
}

/// Enumerate every fixture file under `root`, recursively.
///
/// Entries are visited in file-name order at every level, so the sequence
/// is stable for a given tree. Traversal errors are yielded in place and
/// iteration continues with the next entry. Calling `walk` again starts a
/// fresh traversal.
pub fn walk(root: &Path) -> impl Iterator<Item = Result<PathBuf, CorpusError>> {
    let root = root.to_path_buf();
    WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && is_fixture(entry.path()) {
                    Some(Ok(entry.into_path()))
                } else {
                    None
                }
            }
            Err(source) => {
                let path = source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.clone());
                Some(Err(CorpusError::Walk { path, source }))
            }
        })
}

/// Returns true if `path` names a fixture file.
pub fn is_fixture(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == FIXTURE_EXTENSION)
}

/// Read and parse a file as JSON. The shape of the value is not checked.
pub fn load(path: &Path) -> Result<Value, CorpusError> {
    let bytes = std::fs::read(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|e| CorpusError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Load a fixture file and decode it as an array of test groups.
pub fn load_test_file(path: &Path) -> Result<TestFile, CorpusError> {
    let value = load(path)?;
    serde_json::from_value(value).map_err(|e| CorpusError::Shape {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Flatten fixture files into self-contained test cases.
///
/// Cases come out in input file order, then group order within a file,
/// then declaration order within a group. Each file is loaded only when
/// the consumer reaches it. A failing path or file yields its error in
/// place; collecting into `Result<Vec<_>, _>` stops at the first one.
pub fn flatten<I>(paths: I) -> impl Iterator<Item = Result<TestCase, CorpusError>>
where
    I: IntoIterator<Item = Result<PathBuf, CorpusError>>,
{
    paths.into_iter().flat_map(|entry| {
        let cases: Box<dyn Iterator<Item = Result<TestCase, CorpusError>>> =
            match entry.and_then(|path| load_test_file(&path)) {
                Ok(groups) => Box::new(
                    groups
                        .into_iter()
                        .flat_map(TestGroup::into_cases)
                        .map(Ok),
                ),
                Err(e) => Box::new(std::iter::once(Err(e))),
            };
        cases
    })
}

/// Flatten fixture files and apply a uniform random permutation.
///
/// Every case appears exactly once. With `Some(seed)` the order is
/// reproducible; with `None` the generator is seeded from OS entropy.
pub fn flatten_randomized<I>(paths: I, seed: Option<u64>) -> Result<Vec<TestCase>, CorpusError>
where
    I: IntoIterator<Item = Result<PathBuf, CorpusError>>,
{
    let mut cases = flatten(paths).collect::<Result<Vec<_>, _>>()?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    cases.shuffle(&mut rng);
    Ok(cases)
}

/// Flatten every fixture under `root`, optionally in random order.
pub fn flatten_dir(
    root: &Path,
    randomize: bool,
    seed: Option<u64>,
) -> Result<Vec<TestCase>, CorpusError> {
    if randomize {
        flatten_randomized(walk(root), seed)
    } else {
        flatten(walk(root)).collect()
    }
}

/// The draft a fixture belongs to: the first directory below `root`.
///
/// Files directly under `root`, or outside it, belong to no draft.
pub fn draft_of(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut components = relative.components();
    let first = components.next()?;
    // The first component must be a directory, i.e. something follows it.
    components.next()?;
    first.as_os_str().to_str().map(str::to_string)
}
