//! `POST /suggestTask`: utterance in, task out.

use crate::error::ApiError;
use crate::state::SharedState;
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use ts_core::api::{SuggestTaskRequest, SuggestTaskResponse};

/// Request body as sent. Every field is optional here so that missing
/// fields become validation errors rather than parse errors.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestTaskDraft {
    pub utterance: Option<String>,
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl SuggestTaskDraft {
    pub fn validate(self) -> Result<SuggestTaskRequest, ApiError> {
        let mut errors = BTreeMap::new();
        let utterance = not_blank("utterance", self.utterance, &mut errors);
        let user_id = not_blank("userId", self.user_id, &mut errors);
        let session_id = not_blank("sessionId", self.session_id, &mut errors);
        if self.timestamp.is_none() {
            errors.insert("timestamp".into(), "timestamp must not be null".into());
        }

        match (utterance, user_id, session_id, self.timestamp) {
            (Some(utterance), Some(user_id), Some(session_id), Some(timestamp)) => {
                Ok(SuggestTaskRequest {
                    utterance,
                    user_id,
                    session_id,
                    timestamp,
                })
            }
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

fn not_blank(
    field: &str,
    value: Option<String>,
    errors: &mut BTreeMap<String, String>,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            errors.insert(field.to_string(), format!("{field} must not be blank"));
            None
        }
    }
}

/// Parse and validate a raw body.
pub fn parse_request(body: &[u8]) -> Result<SuggestTaskRequest, ApiError> {
    let draft: SuggestTaskDraft =
        serde_json::from_slice(body).map_err(|e| ApiError::MalformedBody(e.to_string()))?;
    draft.validate()
}

pub async fn suggest_task(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<SuggestTaskResponse>, ApiError> {
    let req = parse_request(&body)?;
    tracing::info!(
        "Received suggestTask: userId={}, sessionId={}, timestamp={}, utterance='{}'",
        req.user_id,
        req.session_id,
        req.timestamp.to_rfc3339(),
        req.utterance
    );

    let task = state.service.suggest_task(req.utterance.as_str());

    tracing::info!(
        "Responding task='{}' for userId={} sessionId={}",
        task,
        req.user_id,
        req.session_id
    );
    Ok(Json(SuggestTaskResponse::now(task)))
}
