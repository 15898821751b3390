use db::RecordStore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{Action, GenerationError, PipelineError};
use crate::models::{JOB_COLLECTION, JobFormat, JobStatus, Progress, TRIGGER_PHRASE, VideoJob};
use crate::services::actions::{
    ActionProvider, AutoEditRequest, GenerateBrollRequest, GenerateVoiceRequest,
};

pub const DEFAULT_TOPIC: &str = "Why AI copilots are changing software in 2025";
pub const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(30);
pub const FINAL_STEP: &str = "Final MP4 Output";

const SCENE_PROMPTS: [&str; 3] = [
    "Developer coding with AI suggestions on screen",
    "Graph showing productivity improvements",
    "Security team reviewing AI-generated code",
];

fn default_trigger_phrase() -> String {
    TRIGGER_PHRASE.to_string()
}

fn default_voice() -> String {
    "male_tech_voice".to_string()
}

fn default_style() -> String {
    "tech_fastpaced".to_string()
}

fn default_format() -> JobFormat {
    JobFormat::Hd1080
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    #[serde(default = "default_trigger_phrase")]
    pub trigger_phrase: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_format")]
    pub format: JobFormat,
}

impl Default for RunRequest {
    fn default() -> Self {
        Self {
            trigger_phrase: default_trigger_phrase(),
            topic: None,
            voice: default_voice(),
            style: default_style(),
            format: default_format(),
        }
    }
}

/// Placeholder trend pick. There is no real trend analysis behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub topic: String,
    pub why: String,
    pub viral_score: u32,
    pub angle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    /// `None` when the job could not be persisted.
    pub job_id: Option<String>,
    pub trend: Trend,
    pub script: String,
    pub voiceover_url: String,
    pub broll_urls: Vec<String>,
    pub final_url: String,
}

pub fn validate_trigger(phrase: &str) -> Result<(), PipelineError> {
    if phrase.trim() == TRIGGER_PHRASE {
        Ok(())
    } else {
        Err(PipelineError::InvalidTrigger {
            phrase: phrase.to_string(),
        })
    }
}

/// Missing or empty topics fall back to [`DEFAULT_TOPIC`]. Whitespace is kept as given.
pub fn resolve_topic(topic: Option<&str>) -> String {
    match topic {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => DEFAULT_TOPIC.to_string(),
    }
}

pub fn select_trend(topic: &str) -> Trend {
    Trend {
        topic: topic.to_string(),
        why: "Mass adoption in IDEs and office suites".to_string(),
        viral_score: 87,
        angle: "Pros & cons with real examples".to_string(),
    }
}

pub fn write_script(topic: &str) -> String {
    format!(
        "Title: {}\n\n\
         Intro: In this video, we explore how AI copilots...\n\
         ...\n\
         Conclusion: Subscribe for more!",
        topic
    )
}

pub fn scene_prompts() -> Vec<String> {
    SCENE_PROMPTS.iter().map(|s| s.to_string()).collect()
}

/// Runs trend -> script -> voice -> b-roll -> edit -> persist.
pub struct PipelineOrchestrator {
    actions: Arc<dyn ActionProvider>,
    store: RecordStore,
    action_timeout: Duration,
}

impl PipelineOrchestrator {
    pub fn new(actions: Arc<dyn ActionProvider>, store: RecordStore) -> Self {
        Self {
            actions,
            store,
            action_timeout: DEFAULT_ACTION_TIMEOUT,
        }
    }

    pub fn with_action_timeout(mut self, timeout: Duration) -> Self {
        self.action_timeout = timeout;
        self
    }

    pub async fn run(&self, request: RunRequest) -> Result<PipelineResult, PipelineError> {
        validate_trigger(&request.trigger_phrase)?;

        let topic = resolve_topic(request.topic.as_deref());
        let trend = select_trend(&topic);
        info!("Starting pipeline run for topic: {}", topic);

        let script = write_script(&topic);
        let scenes = scene_prompts();
        let mut logs = vec![format!("Trend selected: {}", topic), "Script generated".to_string()];

        let voice = self
            .invoke(
                Action::GenerateVoice,
                self.actions.generate_voice(&GenerateVoiceRequest {
                    script: script.clone(),
                    voice: request.voice.clone(),
                }),
            )
            .await?;
        logs.push(format!("Voiceover generated: {}", voice.voiceover_url));

        let broll = self
            .invoke(
                Action::GenerateBroll,
                self.actions.generate_broll(&GenerateBrollRequest {
                    scene_prompts: scenes,
                }),
            )
            .await?;
        logs.push(format!("B-roll generated: {} clips", broll.broll_urls.len()));

        let edit = self
            .invoke(
                Action::AutoEdit,
                self.actions.auto_edit(&AutoEditRequest {
                    voiceover_url: voice.voiceover_url.clone(),
                    broll_urls: broll.broll_urls.clone(),
                    style: request.style.clone(),
                    format: request.format.as_str().to_string(),
                }),
            )
            .await?;
        logs.push(format!("Final video rendered: {}", edit.final_url));

        let job = VideoJob {
            status: JobStatus::Completed,
            step: Some(FINAL_STEP.to_string()),
            progress: Progress::COMPLETE,
            voice: request.voice,
            style: request.style,
            format: request.format,
            script: Some(script.clone()),
            voiceover_url: Some(voice.voiceover_url.clone()),
            broll_urls: Some(broll.broll_urls.clone()),
            final_url: Some(edit.final_url.clone()),
            logs: Some(logs),
            meta: Some(trend_meta(&trend)),
            ..VideoJob::new(topic)
        };

        let job_id = self.persist(&job).await;
        info!(
            "Pipeline run finished for topic: {} (job id: {:?})",
            job.topic, job_id
        );

        Ok(PipelineResult {
            job_id,
            trend,
            script,
            voiceover_url: voice.voiceover_url,
            broll_urls: broll.broll_urls,
            final_url: edit.final_url,
        })
    }

    async fn invoke<T, F>(&self, action: Action, call: F) -> Result<T, PipelineError>
    where
        F: Future<Output = Result<T, GenerationError>>,
    {
        debug!("Invoking action {}", action);
        match tokio::time::timeout(self.action_timeout, call).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(source)) => Err(PipelineError::Generation { action, source }),
            Err(_) => Err(PipelineError::ActionTimeout {
                action,
                timeout: self.action_timeout,
            }),
        }
    }

    // Persistence is best-effort here: generated artifacts are returned even
    // when the store is down.
    async fn persist(&self, job: &VideoJob) -> Option<String> {
        match self.store.insert(JOB_COLLECTION, job).await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("Failed to persist pipeline job, returning without job id: {}", e);
                None
            }
        }
    }
}

fn trend_meta(trend: &Trend) -> Map<String, Value> {
    let mut meta = Map::new();
    if let Ok(value) = serde_json::to_value(trend) {
        meta.insert("trend".to_string(), value);
    }
    meta
}
