//! Generation actions: voiceover, b-roll and the final auto-edit.
//!
//! The pipeline talks to these through [`ActionProvider`]. The only provider
//! shipped here is [`MockActionProvider`], which returns placeholder URLs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

const MOCK_HOST: &str = "https://example.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateVoiceRequest {
    pub script: String,
    pub voice: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateVoiceResponse {
    pub voiceover_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateBrollRequest {
    pub scene_prompts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateBrollResponse {
    pub broll_urls: Vec<String>,
}

/// `format` is passed through untouched; actions do not validate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoEditRequest {
    pub voiceover_url: String,
    pub broll_urls: Vec<String>,
    pub style: String,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoEditResponse {
    pub final_url: String,
}

#[async_trait]
pub trait ActionProvider: Send + Sync {
    async fn generate_voice(
        &self,
        request: &GenerateVoiceRequest,
    ) -> Result<GenerateVoiceResponse, GenerationError>;

    /// Must return exactly one URL per scene prompt, in prompt order.
    async fn generate_broll(
        &self,
        request: &GenerateBrollRequest,
    ) -> Result<GenerateBrollResponse, GenerationError>;

    async fn auto_edit(&self, request: &AutoEditRequest)
    -> Result<AutoEditResponse, GenerationError>;
}

/// Stand-in for the external generation services. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockActionProvider;

#[async_trait]
impl ActionProvider for MockActionProvider {
    async fn generate_voice(
        &self,
        request: &GenerateVoiceRequest,
    ) -> Result<GenerateVoiceResponse, GenerationError> {
        tracing::debug!(
            "Mock voiceover for {} script chars with voice {}",
            request.script.len(),
            request.voice
        );
        Ok(GenerateVoiceResponse {
            voiceover_url: format!("{}/voiceover.mp3", MOCK_HOST),
        })
    }

    async fn generate_broll(
        &self,
        request: &GenerateBrollRequest,
    ) -> Result<GenerateBrollResponse, GenerationError> {
        let broll_urls = (1..=request.scene_prompts.len())
            .map(|i| format!("{}/broll_{}.mp4", MOCK_HOST, i))
            .collect();
        Ok(GenerateBrollResponse { broll_urls })
    }

    async fn auto_edit(
        &self,
        request: &AutoEditRequest,
    ) -> Result<AutoEditResponse, GenerationError> {
        tracing::debug!(
            "Mock edit of {} clips, style {}, format {}",
            request.broll_urls.len(),
            request.style,
            request.format
        );
        Ok(AutoEditResponse {
            final_url: format!("{}/final_video.mp4", MOCK_HOST),
        })
    }
}
