//! Task Classifier: earliest-match resolution across a pattern catalog.

use crate::catalog::{default_catalog, PatternCatalog};
use crate::pattern::MatchSpan;
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use ts_core::task::{TaskId, NO_TASK};

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("whitespace regex");
}

/// Collapse every whitespace run (spaces, tabs, newlines) to a single space.
///
/// Gap bounds are counted on this form, so it must run before matching.
pub fn normalize_whitespace(text: &str) -> Cow<'_, str> {
    WHITESPACE_RUN.replace_all(text, " ")
}

/// Outcome of one classification, with the evidence behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub task: TaskId,
    /// Winning match in the normalized text; `None` iff `task` is `NO_TASK`.
    pub span: Option<MatchSpan>,
    pub patterns_evaluated: usize,
}

impl Classification {
    fn no_match(patterns_evaluated: usize) -> Self {
        Self {
            task: NO_TASK,
            span: None,
            patterns_evaluated,
        }
    }

    pub fn is_match(&self) -> bool {
        self.span.is_some()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Classifier<'c> {
    catalog: &'c PatternCatalog,
}

impl Default for Classifier<'static> {
    fn default() -> Self {
        Self::new(default_catalog())
    }
}

impl<'c> Classifier<'c> {
    pub fn new(catalog: &'c PatternCatalog) -> Self {
        Self { catalog }
    }

    /// Absent, empty or blank text yields `NO_TASK`.
    pub fn classify<'t>(&self, text: impl Into<Option<&'t str>>) -> TaskId {
        self.classify_detailed(text).task
    }

    pub fn classify_detailed<'t>(&self, text: impl Into<Option<&'t str>>) -> Classification {
        let Some(raw) = text.into().filter(|t| !t.trim().is_empty()) else {
            return Classification::no_match(0);
        };
        let text = normalize_whitespace(raw);

        let mut best: Option<(&TaskId, MatchSpan)> = None;
        let mut evaluated = 0;

        for entry in self.catalog.entries() {
            for pattern in entry.patterns() {
                evaluated += 1;
                let Some(span) = pattern.find(&text) else {
                    continue;
                };
                tracing::trace!(task = %entry.task(), %pattern, start = span.start, "pattern matched");
                // strict `<`: on equal offsets the first-declared task keeps the win
                if best.map_or(true, |(_, b)| span.start < b.start) {
                    best = Some((entry.task(), span));
                }
            }
        }

        match best {
            Some((task, span)) => Classification {
                task: task.clone(),
                span: Some(span),
                patterns_evaluated: evaluated,
            },
            None => Classification::no_match(evaluated),
        }
    }
}
