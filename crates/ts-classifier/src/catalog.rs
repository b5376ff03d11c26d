//! Pattern Catalog: ordered task → patterns mapping, compiled once.

use crate::pattern::{KeywordSpec, Pattern, PatternSpec};
use crate::ClassifierError;
use lazy_static::lazy_static;
use ts_core::task::{TaskId, CHECK_ORDER_STATUS, RESET_PASSWORD};

/// Maximum characters allowed between the two keywords of a proximity pattern.
pub const MAX_GAP: usize = 15;

lazy_static! {
    static ref BUILTIN: PatternCatalog =
        PatternCatalog::builtin().expect("built-in pattern catalog failed to compile");
}

/// The process-wide built-in catalog.
///
/// Panics on first use if a built-in rule does not compile; the server forces
/// this during startup so the failure aborts the process before serving.
pub fn default_catalog() -> &'static PatternCatalog {
    &BUILTIN
}

#[derive(Debug, Clone)]
pub struct CatalogEntry {
    task: TaskId,
    patterns: Vec<Pattern>,
}

impl CatalogEntry {
    pub fn task(&self) -> &TaskId {
        &self.task
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }
}

/// Immutable, explicitly ordered catalog. Declaration order is the
/// tie-break when two tasks match at the same offset.
#[derive(Debug, Clone, Default)]
pub struct PatternCatalog {
    entries: Vec<CatalogEntry>,
}

impl PatternCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// `ResetPasswordTask` then `CheckOrderStatusTask`.
    pub fn builtin() -> Result<Self, ClassifierError> {
        Self::builder()
            .task(RESET_PASSWORD, reset_password_rules())
            .task(CHECK_ORDER_STATUS, check_order_rules())
            .build()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn tasks(&self) -> impl Iterator<Item = &TaskId> {
        self.entries.iter().map(CatalogEntry::task)
    }

    pub fn patterns_for(&self, task: &TaskId) -> Option<&[Pattern]> {
        self.entries
            .iter()
            .find(|e| e.task == *task)
            .map(CatalogEntry::patterns)
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pattern_count(&self) -> usize {
        self.entries.iter().map(|e| e.patterns.len()).sum()
    }
}

#[derive(Debug, Default)]
pub struct CatalogBuilder {
    tasks: Vec<(TaskId, Vec<PatternSpec>)>,
}

impl CatalogBuilder {
    pub fn task(
        mut self,
        task: impl Into<TaskId>,
        rules: impl IntoIterator<Item = PatternSpec>,
    ) -> Self {
        self.tasks.push((task.into(), rules.into_iter().collect()));
        self
    }

    pub fn build(self) -> Result<PatternCatalog, ClassifierError> {
        let mut entries: Vec<CatalogEntry> = Vec::with_capacity(self.tasks.len());

        for (task, rules) in self.tasks {
            if task.is_no_task() {
                return Err(ClassifierError::ReservedTask(task));
            }
            if entries.iter().any(|e| e.task == task) {
                return Err(ClassifierError::DuplicateTask(task));
            }
            let patterns = rules
                .iter()
                .map(PatternSpec::compile)
                .collect::<Result<Vec<_>, _>>()?;
            tracing::debug!(task = %task, patterns = patterns.len(), "compiled task patterns");
            entries.push(CatalogEntry { task, patterns });
        }

        Ok(PatternCatalog { entries })
    }
}

// ---------------------------------------------------------------------------
// Built-in rules
// ---------------------------------------------------------------------------

fn reset_password_rules() -> Vec<PatternSpec> {
    vec![
        // "reset ... password", "I forgot my password"
        PatternSpec::proximity("reset", "password", MAX_GAP),
        PatternSpec::proximity("forgot", "password", MAX_GAP),
        // reverse stays contiguous, a gap there is too noisy
        PatternSpec::reverse("reset", "password"),
        PatternSpec::reverse("forgot", "password"),
        PatternSpec::phrase("reset", "password"),
        PatternSpec::phrase("forgot", "password"),
    ]
}

fn check_order_rules() -> Vec<PatternSpec> {
    vec![
        PatternSpec::proximity("check", order_keyword(), MAX_GAP),
        PatternSpec::proximity("track", order_keyword(), MAX_GAP),
        PatternSpec::reverse("check", "order"),
        PatternSpec::reverse("track", "order"),
        PatternSpec::phrase("check", "order"),
        PatternSpec::phrase("track", "order"),
    ]
}

/// "order" outside the "in order to" idiom.
fn order_keyword() -> KeywordSpec {
    KeywordSpec::new("order")
        .except_preceded_by("in")
        .except_followed_by("to")
}
