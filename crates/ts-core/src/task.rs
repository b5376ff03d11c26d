//! Task identifiers: the labels a classification can produce.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Returned when no pattern of any task matches. Never a catalog key.
pub const NO_TASK: TaskId = TaskId::from_static("NoTaskFound");

/// "reset my password" family.
pub const RESET_PASSWORD: TaskId = TaskId::from_static("ResetPasswordTask");

/// "where is my order" family.
pub const CHECK_ORDER_STATUS: TaskId = TaskId::from_static("CheckOrderStatusTask");

/// Opaque task label. Serializes as a bare JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Cow<'static, str>);

impl TaskId {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the no-match sentinel.
    pub fn is_no_task(&self) -> bool {
        *self == NO_TASK
    }
}

impl Default for TaskId {
    fn default() -> Self {
        NO_TASK
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for TaskId {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for TaskId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_sentinel() {
        assert_eq!(TaskId::default(), NO_TASK);
        assert!(TaskId::default().is_no_task());
        assert!(!RESET_PASSWORD.is_no_task());
    }

    #[test]
    fn owned_and_borrowed_compare_equal() {
        assert_eq!(TaskId::new("CheckOrderStatusTask"), CHECK_ORDER_STATUS);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&RESET_PASSWORD).unwrap();
        assert_eq!(json, "\"ResetPasswordTask\"");
        let back: TaskId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RESET_PASSWORD);
    }
}
