pub mod actions;
pub mod jobs;
pub mod orchestrator;
