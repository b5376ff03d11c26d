//! Axum router.

use crate::handlers::suggest::suggest_task;
use crate::state::AppState;
use axum::routing::post;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/suggestTask", post(suggest_task))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use ts_runner::SimulatedUpstream;

    fn app() -> Router {
        // Upstream succeeds at once; retry behaviour is covered in ts-runner.
        build_router(AppState::new(SimulatedUpstream::new(0)))
    }

    async fn post_raw(body: &str) -> (StatusCode, Option<String>, Value) {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/suggestTask")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        let status = res.status();
        let content_type = res
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, content_type, value)
    }

    async fn post_json(body: Value) -> (StatusCode, Value) {
        let (status, _, value) = post_raw(&body.to_string()).await;
        (status, value)
    }

    fn request(utterance: &str) -> Value {
        json!({
            "utterance": utterance,
            "userId": "12345",
            "sessionId": "abcde-67890",
            "timestamp": "2025-08-21T12:00:00Z",
        })
    }

    #[tokio::test]
    async fn reset_password() {
        let (status, content_type, body) =
            post_raw(&request("I want to reset my password").to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("application/json"));
        assert_eq!(body["task"], "ResetPasswordTask");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn track_order() {
        let (status, body) = post_json(request("can you track my order?")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["task"], "CheckOrderStatusTask");
    }

    #[tokio::test]
    async fn no_task_found() {
        let (status, body) = post_json(request("how do I change my email")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["task"], "NoTaskFound");

        let (_, body) = post_json(request("I checked in order to be sure")).await;
        assert_eq!(body["task"], "NoTaskFound");
    }

    #[tokio::test]
    async fn gap_boundary() {
        // Exactly 15 characters between keywords, then 16.
        let (_, body) = post_json(request("reset 1234567890123 password")).await;
        assert_eq!(body["task"], "ResetPasswordTask");
        let (_, body) = post_json(request("reset 12345678901234 password")).await;
        assert_eq!(body["task"], "NoTaskFound");
    }

    #[tokio::test]
    async fn extra_fields_are_ignored() {
        let mut req = request("forgot password");
        req["extraField"] = json!("ignored");
        let (status, body) = post_json(req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["task"], "ResetPasswordTask");
    }

    #[tokio::test]
    async fn missing_utterance() {
        let mut req = request("x");
        req.as_object_mut().unwrap().remove("utterance");
        let (status, body) = post_json(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"]["utterance"], "utterance must not be blank");
    }

    #[tokio::test]
    async fn blank_utterance() {
        let (status, body) = post_json(request("   ")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["utterance"].is_string());
    }

    #[tokio::test]
    async fn missing_correlation_fields() {
        for (field, message) in [
            ("userId", "userId must not be blank"),
            ("sessionId", "sessionId must not be blank"),
            ("timestamp", "timestamp must not be null"),
        ] {
            let mut req = request("reset password");
            req.as_object_mut().unwrap().remove(field);
            let (status, body) = post_json(req).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{field}");
            assert_eq!(body["errors"][field], message);
        }
    }

    #[tokio::test]
    async fn empty_object() {
        let (status, body) = post_json(json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_object().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn malformed_json() {
        let (status, _, body) =
            post_raw(r#"{"utterance":"reset password","userId":"12345""#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Malformed request body");
        assert_eq!(body["errors"]["body"], "Invalid JSON or field format");
    }

    #[tokio::test]
    async fn malformed_timestamp() {
        let mut req = request("reset password");
        req["timestamp"] = json!("21-08-2025 12:00");
        let (status, body) = post_json(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Malformed request body");
        assert!(body["errors"]["timestamp"]
            .as_str()
            .unwrap()
            .contains("ISO-8601"));
    }

    #[tokio::test]
    async fn get_is_not_allowed() {
        let req = Request::builder()
            .method(Method::GET)
            .uri("/suggestTask")
            .body(Body::empty())
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
