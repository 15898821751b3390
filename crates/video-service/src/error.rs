use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use video_pipeline::{GenerationError, JobServiceError, PipelineError};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    Pipeline(PipelineError),
    Jobs(JobServiceError),
    Generation(GenerationError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Pipeline(PipelineError::InvalidTrigger { .. }) => StatusCode::BAD_REQUEST,
            Self::Pipeline(PipelineError::Generation { .. }) | Self::Generation(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Pipeline(PipelineError::ActionTimeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            Self::Jobs(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Pipeline(e) => e.to_string(),
            Self::Jobs(e) => e.to_string(),
            Self::Generation(e) => e.to_string(),
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        Self::Pipeline(e)
    }
}

impl From<JobServiceError> for ApiError {
    fn from(e: JobServiceError) -> Self {
        Self::Jobs(e)
    }
}

impl From<GenerationError> for ApiError {
    fn from(e: GenerationError) -> Self {
        Self::Generation(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            error!("Request failed with {}: {}", status, message);
        } else {
            warn!("Rejected request with {}: {}", status, message);
        }

        (
            status,
            Json(ErrorResponse {
                status: "error".to_string(),
                message,
            }),
        )
            .into_response()
    }
}
