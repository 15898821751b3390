use axum::{Json, extract::State};
use tracing::info;
use video_pipeline::services::actions::{
    AutoEditRequest, AutoEditResponse, GenerateBrollRequest, GenerateBrollResponse,
    GenerateVoiceRequest, GenerateVoiceResponse,
};

use crate::AppState;
use crate::error::ApiError;

pub async fn generate_voice(
    State(state): State<AppState>,
    Json(request): Json<GenerateVoiceRequest>,
) -> Result<Json<GenerateVoiceResponse>, ApiError> {
    info!("Received voice action request with voice {}", request.voice);
    Ok(Json(state.actions.generate_voice(&request).await?))
}

pub async fn generate_broll(
    State(state): State<AppState>,
    Json(request): Json<GenerateBrollRequest>,
) -> Result<Json<GenerateBrollResponse>, ApiError> {
    info!(
        "Received b-roll action request for {} scenes",
        request.scene_prompts.len()
    );
    Ok(Json(state.actions.generate_broll(&request).await?))
}

pub async fn auto_edit_video(
    State(state): State<AppState>,
    Json(request): Json<AutoEditRequest>,
) -> Result<Json<AutoEditResponse>, ApiError> {
    info!(
        "Received auto edit request for {} clips in format {}",
        request.broll_urls.len(),
        request.format
    );
    Ok(Json(state.actions.auto_edit(&request).await?))
}
