//! Client side of the job tracker.
//!
//! - [`sdk`] - HTTP client for the job API
//! - [`local`] - the same operations served in-process by a [`crate::api::JobService`]
//! - [`cache`] - explicit snapshot of the record set with `refresh()`
//! - [`query`] - filter predicates and the stable date sort
//! - [`selection`] - selection set and batch delete
//! - [`export`] - field-selectable CSV export

pub mod cache;
pub mod export;
pub mod local;
pub mod query;
pub mod sdk;
pub mod selection;

pub use cache::JobCache;
pub use export::{export_subset, parse_fields, ExportTable, JobField};
pub use query::{DateFilter, DatePreset, DateRange, FilterSpec};
pub use sdk::JobClient;
pub use selection::{batch_delete, BatchDeleteReport, BatchFailure, Selection};

use crate::error::Result;
use crate::model::{JobApplication, JobPayload};

/// Operations the client engines need from a job backend.
///
/// Implemented by the HTTP [`JobClient`] and by the in-process service.
/// Every call is a single attempt: no retry, no backoff.
pub trait JobApi: Send + Sync {
    /// Create a record.
    fn create_job(
        &self,
        payload: &JobPayload,
    ) -> impl std::future::Future<Output = Result<JobApplication>> + Send;

    /// Fetch every record.
    fn list_jobs(&self) -> impl std::future::Future<Output = Result<Vec<JobApplication>>> + Send;

    /// Fetch one record.
    fn get_job(&self, id: &str) -> impl std::future::Future<Output = Result<JobApplication>> + Send;

    /// Apply a partial update.
    fn update_job(
        &self,
        id: &str,
        payload: &JobPayload,
    ) -> impl std::future::Future<Output = Result<JobApplication>> + Send;

    /// Delete a record, returning it.
    fn delete_job(&self, id: &str)
    -> impl std::future::Future<Output = Result<JobApplication>> + Send;
}
