use axum::{Json, extract::State};
use tracing::info;
use video_pipeline::services::orchestrator::{PipelineResult, RunRequest};

use crate::AppState;
use crate::error::ApiError;

pub async fn run_pipeline(
    State(state): State<AppState>,
    Json(request): Json<RunRequest>,
) -> Result<Json<PipelineResult>, ApiError> {
    info!(
        "Received run request (topic: {:?}, format: {})",
        request.topic, request.format
    );
    let result = state.orchestrator.run(request).await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorResponse;
    use crate::routes::test_support::{server_with_backend, server_with_store};
    use axum::http::StatusCode;
    use db::RecordStore;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use test_components::{FailingDocumentStore, InMemoryDocumentStore};
    use video_pipeline::models::TRIGGER_PHRASE;

    #[tokio::test]
    async fn test_run_returns_artifacts_and_job_id() {
        let backend = Arc::new(InMemoryDocumentStore::new());
        let server = server_with_backend(backend.clone());

        let response = server
            .post("/api/run")
            .json(&json!({"trigger_phrase": TRIGGER_PHRASE, "topic": "Rust web servers"}))
            .await;

        response.assert_status_ok();
        let result = response.json::<PipelineResult>();
        assert_eq!(result.trend.topic, "Rust web servers");
        assert!(result.script.contains("Rust web servers"));
        assert_eq!(result.broll_urls.len(), 3);
        assert_eq!(result.job_id.as_deref(), Some(backend.documents("videojob")[0].0.as_str()));
    }

    #[tokio::test]
    async fn test_run_uses_defaults_for_empty_body() {
        let backend = Arc::new(InMemoryDocumentStore::new());
        let server = server_with_backend(backend.clone());

        let response = server.post("/api/run").json(&json!({})).await;

        response.assert_status_ok();
        let (_, job) = &backend.documents("videojob")[0];
        assert_eq!(job["format"], json!("1080p"));
        assert_eq!(job["voice"], json!("male_tech_voice"));
        assert_eq!(job["status"], json!("completed"));
        assert_eq!(job["progress"], json!(100));
    }

    #[tokio::test]
    async fn test_run_rejects_wrong_trigger() {
        let backend = Arc::new(InMemoryDocumentStore::new());
        let server = server_with_backend(backend.clone());

        let response = server
            .post("/api/run")
            .json(&json!({"trigger_phrase": "wrong"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<ErrorResponse>();
        assert_eq!(body.message, "Invalid trigger phrase");
        assert_eq!(backend.insert_count(), 0);
    }

    #[tokio::test]
    async fn test_run_with_failing_store_returns_null_job_id() {
        let server = server_with_backend(Arc::new(FailingDocumentStore));

        let response = server.post("/api/run").json(&json!({"topic": "X"})).await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["job_id"], Value::Null);
        assert!(body["script"].as_str().unwrap().contains("X"));
        assert!(body["voiceover_url"].is_string());
        assert_eq!(body["broll_urls"].as_array().unwrap().len(), 3);
        assert!(body["final_url"].is_string());
    }

    #[tokio::test]
    async fn test_run_without_store_still_succeeds() {
        let server = server_with_store(RecordStore::uninitialized());

        let result = server
            .post("/api/run")
            .json(&json!({}))
            .await
            .json::<PipelineResult>();

        assert_eq!(result.job_id, None);
        assert_eq!(result.final_url, "https://example.com/final_video.mp4");
    }

    #[tokio::test]
    async fn test_run_twice_creates_two_jobs() {
        let backend = Arc::new(InMemoryDocumentStore::new());
        let server = server_with_backend(backend.clone());

        let first = server
            .post("/api/run")
            .json(&json!({"topic": "Same"}))
            .await
            .json::<PipelineResult>();
        let second = server
            .post("/api/run")
            .json(&json!({"topic": "Same"}))
            .await
            .json::<PipelineResult>();

        assert_eq!(first.script, second.script);
        assert_eq!(first.final_url, second.final_url);
        assert_ne!(first.job_id, second.job_id);

        let listed = server.get("/api/jobs").await.json::<Vec<Value>>();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn test_run_rejects_unknown_format() {
        let server = server_with_store(RecordStore::uninitialized());

        let response = server
            .post("/api/run")
            .json(&json!({"format": "vertical"}))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}
