//! Job API service: validation and routing of CRUD requests.
//!
//! Each operation validates its input, performs exactly one store call and
//! maps "no such record" to [`Error::NotFound`]. Validation failures and store
//! faults stay distinct so the HTTP layer can answer 400 and 500 respectively.

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::{JobApplication, JobPayload};
use crate::storage::JobStore;
use crate::validate::{validate_new_job, validate_patch};

/// CRUD service over a [`JobStore`].
///
/// The store sits behind a mutex: one store call runs at a time, and no
/// operation holds the lock across more than a single call.
#[derive(Debug)]
pub struct JobService<S> {
    store: Mutex<S>,
}

impl<S: JobStore> JobService<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, S>> {
        self.store
            .lock()
            .map_err(|_| Error::StoreFault("job store lock poisoned".to_string()))
    }

    /// Validate and insert a new record.
    ///
    /// # Errors
    ///
    /// `Validation` for missing/empty fields, bad dates or unknown statuses;
    /// a store error if the insert fails.
    pub fn create(&self, payload: &JobPayload) -> Result<JobApplication> {
        let job = validate_new_job(payload)?;
        let created = self.store()?.insert(job)?;
        info!(id = %created.id, company = %created.company_name, "Created job application");
        Ok(created)
    }

    /// Every record, unordered.
    ///
    /// # Errors
    ///
    /// Returns a store error if the query fails.
    pub fn list_all(&self) -> Result<Vec<JobApplication>> {
        let jobs = self.store()?.find_all()?;
        debug!(count = jobs.len(), "Listed job applications");
        Ok(jobs)
    }

    /// One record by identifier.
    ///
    /// # Errors
    ///
    /// `NotFound` if no record has this identifier (malformed ones included).
    pub fn get_by_id(&self, id: &str) -> Result<JobApplication> {
        self.store()?
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found(id))
    }

    /// Merge supplied fields into an existing record.
    ///
    /// An empty payload changes nothing and returns the current record.
    ///
    /// # Errors
    ///
    /// `Validation` if a supplied field is invalid, `NotFound` if the
    /// identifier is absent.
    pub fn update_by_id(&self, id: &str, payload: &JobPayload) -> Result<JobApplication> {
        let patch = validate_patch(payload)?;

        if patch.is_empty() {
            return self.get_by_id(id);
        }

        let updated = self
            .store()?
            .update_by_id(id, &patch)?
            .ok_or_else(|| Error::not_found(id))?;
        info!(id, status = %updated.status, "Updated job application");
        Ok(updated)
    }

    /// Remove a record and return it.
    ///
    /// # Errors
    ///
    /// `NotFound` if the identifier is absent.
    pub fn delete_by_id(&self, id: &str) -> Result<JobApplication> {
        let deleted = self
            .store()?
            .delete_by_id(id)?
            .ok_or_else(|| Error::not_found(id))?;
        info!(id, "Deleted job application");
        Ok(deleted)
    }

    /// Round-trip the store.
    ///
    /// # Errors
    ///
    /// Returns a store error if the store is unreachable.
    pub fn health(&self) -> Result<()> {
        self.store()?.ping()
    }
}
