//! ts-classifier: Utterance → TaskId classifier
//!
//! Pipeline: PatternCatalog (compiled once) → Classifier (normalize, scan, earliest match wins).
//! Absence of a match is a normal result (`NO_TASK`), never an error.

pub mod catalog;
pub mod classifier;
pub mod pattern;

pub use catalog::{default_catalog, CatalogBuilder, CatalogEntry, PatternCatalog, MAX_GAP};
pub use classifier::{normalize_whitespace, Classification, Classifier};
pub use pattern::{Exclusion, KeywordSpec, MatchSpan, Pattern, PatternShape, PatternSpec};

use thiserror::Error;
use ts_core::task::TaskId;

/// Catalog construction errors. These only surface while building a catalog,
/// never while classifying.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("empty keyword in pattern rule")]
    EmptyKeyword,
    #[error("invalid keyword '{0}': must be a single word starting and ending with a word character")]
    InvalidKeyword(String),
    #[error("task '{0}' is reserved for the no-match result")]
    ReservedTask(TaskId),
    #[error("task '{0}' declared twice")]
    DuplicateTask(TaskId),
    #[error("pattern compilation failed: {0}")]
    Regex(#[from] regex::Error),
}

/// Classify `text` against the built-in catalog.
pub fn classify<'t>(text: impl Into<Option<&'t str>>) -> TaskId {
    Classifier::default().classify(text)
}
