//! Data models for Job Tracker.
//!
//! - `JobApplication` (the persisted record)
//! - `JobPayload` (untyped create/update body)
//! - `NewJob` / `JobPatch` (validated requests)

pub mod job;

pub use job::{new_job_id, JobApplication, JobPatch, JobPayload, JobStatus, NewJob};
