use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::info;
use video_pipeline::models::{JobDocument, VideoJob};
use video_pipeline::services::jobs::{CreatedJob, DEFAULT_LIST_LIMIT};

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListJobsParams {
    limit: Option<usize>,
}

pub async fn create_job(
    State(state): State<AppState>,
    Json(job): Json<VideoJob>,
) -> Result<Json<CreatedJob>, ApiError> {
    info!("Received create job request for topic: {}", job.topic);
    let created = state.jobs.create_job(job).await?;
    Ok(Json(created))
}

pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<ListJobsParams>,
) -> Result<Json<Vec<JobDocument>>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let jobs = state.jobs.list_jobs(limit).await?;
    Ok(Json(jobs))
}
