use db::StoreError;
use std::fmt;
use std::time::Duration;

/// The three generation actions, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GenerateVoice,
    GenerateBroll,
    AutoEdit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GenerateVoice => write!(f, "generate_voice"),
            Self::GenerateBroll => write!(f, "generate_broll"),
            Self::AutoEdit => write!(f, "auto_edit_video"),
        }
    }
}

/// Rejected input to a generation action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {reason}")]
pub struct GenerationError {
    pub field: String,
    pub reason: String,
}

impl GenerationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("Invalid trigger phrase")]
    InvalidTrigger { phrase: String },

    #[error("{action} failed: {source}")]
    Generation {
        action: Action,
        #[source]
        source: GenerationError,
    },

    #[error("{action} did not finish within {}s", .timeout.as_secs())]
    ActionTimeout { action: Action, timeout: Duration },
}

#[derive(Debug, thiserror::Error)]
pub enum JobServiceError {
    #[error("persistence error: {0}")]
    Persistence(#[from] StoreError),
}
