pub mod job;

pub use job::{
    JOB_COLLECTION, JobDocument, JobFormat, JobStatus, JobValidationError, Progress,
    TRIGGER_PHRASE, VideoJob,
};
