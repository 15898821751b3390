use axum::{Json, extract::State};
use db::StoreDiagnostics;
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Store connectivity report. Building it never fails.
#[derive(Debug, Serialize, Deserialize)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

fn is_set(value: Option<&String>) -> String {
    let label = if value.is_some() { "Set" } else { "Not Set" };
    label.to_string()
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Auto YouTube Video Generator Backend Running".to_string(),
    })
}

pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the backend API!".to_string(),
    })
}

pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let (database, connection_status, collections) = match state.store.diagnostics().await {
        StoreDiagnostics::NotInitialized => (
            "Available but not initialized".to_string(),
            "Not Connected",
            Vec::new(),
        ),
        StoreDiagnostics::Connected { collections } => {
            ("Connected & Working".to_string(), "Connected", collections)
        }
        StoreDiagnostics::Failing { message } => (
            format!("Connected but Error: {}", message),
            "Connected",
            Vec::new(),
        ),
    };

    Json(DiagnosticsResponse {
        backend: "Running".to_string(),
        database,
        database_url: is_set(state.config.database_url.as_ref()),
        database_name: is_set(state.config.database_name.as_ref()),
        connection_status: connection_status.to_string(),
        collections,
    })
}
