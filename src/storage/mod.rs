//! Record store layer for Job Tracker.
//!
//! The rest of the crate sees the store only through [`JobStore`]:
//! insert, find-all, find-by-id, update-by-id and delete-by-id. Each call is
//! a single store round-trip; update merges inside the store.
//!
//! # Submodules
//!
//! - [`schema`] - Database schema definitions
//! - [`sqlite`] - SQLite implementation

pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::model::{JobApplication, JobPatch, NewJob};

/// Persistence backend for job records.
///
/// Identifier well-formedness is the store's business: an identifier the
/// store does not recognise simply yields `None`.
pub trait JobStore: Send {
    /// Insert a record, assigning its identifier.
    fn insert(&mut self, job: NewJob) -> Result<JobApplication>;

    /// Every record, in no particular order.
    fn find_all(&self) -> Result<Vec<JobApplication>>;

    /// Look up one record.
    fn find_by_id(&self, id: &str) -> Result<Option<JobApplication>>;

    /// Merge `patch` into the record and return the result.
    fn update_by_id(&mut self, id: &str, patch: &JobPatch) -> Result<Option<JobApplication>>;

    /// Remove a record, returning what was removed.
    fn delete_by_id(&mut self, id: &str) -> Result<Option<JobApplication>>;

    /// Cheap round-trip used by health checks.
    fn ping(&self) -> Result<()>;
}
