use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Collection that video jobs are stored under.
pub const JOB_COLLECTION: &str = "videojob";

/// The only phrase that starts a pipeline run.
pub const TRIGGER_PHRASE: &str = "Create a full video automatically.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobValidationError {
    #[error("progress must be between 0 and 100, got {0}")]
    ProgressOutOfRange(i64),

    #[error("unknown format '{0}', expected one of 1080p, 9:16, 16:9, square")]
    UnknownFormat(String),
}

/// Output format preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JobFormat {
    #[serde(rename = "1080p")]
    Hd1080,
    #[serde(rename = "9:16")]
    Portrait,
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "square")]
    Square,
}

impl JobFormat {
    pub const ALL: [Self; 4] = [Self::Hd1080, Self::Portrait, Self::Landscape, Self::Square];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hd1080 => "1080p",
            Self::Portrait => "9:16",
            Self::Landscape => "16:9",
            Self::Square => "square",
        }
    }
}

impl fmt::Display for JobFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobFormat {
    type Err = JobValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| JobValidationError::UnknownFormat(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Queued,
    Running,
    Completed,
    Failed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queued => write!(f, "queued"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Percentage in `[0, 100]`. Out-of-range values cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Progress(u8);

impl Progress {
    pub const COMPLETE: Self = Self(100);

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Progress {
    type Error = JobValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(v) if v <= 100 => Ok(Self(v)),
            _ => Err(JobValidationError::ProgressOutOfRange(value)),
        }
    }
}

impl From<Progress> for u8 {
    fn from(progress: Progress) -> Self {
        progress.0
    }
}

fn default_trigger_phrase() -> String {
    TRIGGER_PHRASE.to_string()
}

fn default_voice() -> String {
    "alloy".to_string()
}

fn default_style() -> String {
    "engaging".to_string()
}

/// A video generation job as it is persisted.
///
/// Deserialization is the validating constructor for caller-supplied jobs:
/// `format`, `status` and `progress` reject anything outside their ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoJob {
    pub topic: String,
    #[serde(default = "default_trigger_phrase")]
    pub trigger_phrase: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default)]
    pub format: JobFormat,

    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub step: Option<String>,
    #[serde(default)]
    pub progress: Progress,

    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub voiceover_url: Option<String>,
    #[serde(default)]
    pub broll_urls: Option<Vec<String>>,
    #[serde(default)]
    pub final_url: Option<String>,

    #[serde(default)]
    pub logs: Option<Vec<String>>,
    #[serde(default)]
    pub meta: Option<Map<String, Value>>,
}

impl VideoJob {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            trigger_phrase: default_trigger_phrase(),
            voice: default_voice(),
            style: default_style(),
            format: JobFormat::default(),
            status: JobStatus::default(),
            step: None,
            progress: Progress::default(),
            script: None,
            voiceover_url: None,
            broll_urls: None,
            final_url: None,
            logs: None,
            meta: None,
        }
    }
}

/// A stored job together with its store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDocument {
    pub id: String,
    #[serde(flatten)]
    pub job: VideoJob,
}
