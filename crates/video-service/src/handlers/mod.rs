pub mod actions;
pub mod health;
pub mod jobs;
pub mod run;
