//! Wire types for `POST /suggestTask`.

use crate::task::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A validated request. Every field is present and non-blank.
///
/// `user_id`, `session_id` and `timestamp` are correlation data only; they
/// are logged but never influence matching.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestTaskRequest {
    pub utterance: String,
    pub user_id: String,
    pub session_id: String,
    /// Client-side send time (RFC 3339).
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestTaskResponse {
    pub task: TaskId,
    /// Server time at response construction.
    pub timestamp: DateTime<Utc>,
}

impl SuggestTaskResponse {
    pub fn now(task: TaskId) -> Self {
        Self {
            task,
            timestamp: Utc::now(),
        }
    }
}

/// Body of every 400-class reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short summary, e.g. "Validation failed".
    pub message: String,
    /// Field name → problem description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, errors: BTreeMap<String, String>) -> Self {
        Self {
            message: message.into(),
            errors: if errors.is_empty() { None } else { Some(errors) },
            timestamp: Utc::now(),
        }
    }
}
