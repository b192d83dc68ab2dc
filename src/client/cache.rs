//! Client-side snapshot of the record set.
//!
//! The cache is owned by whoever runs queries over it and is refreshed on
//! demand; it may be stale between refreshes.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::JobApi;
use crate::error::Result;
use crate::model::JobApplication;

/// Last fetched snapshot of job records.
#[derive(Debug, Clone, Default)]
pub struct JobCache {
    jobs: Vec<JobApplication>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl JobCache {
    /// Empty cache, never refreshed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with the backend's current record set.
    ///
    /// On failure the previous snapshot is kept.
    ///
    /// # Errors
    ///
    /// Propagates the backend error unchanged.
    pub async fn refresh<A: JobApi>(&mut self, api: &A) -> Result<&[JobApplication]> {
        let jobs = api.list_jobs().await?;
        debug!(count = jobs.len(), "Refreshed job cache");
        self.jobs = jobs;
        self.refreshed_at = Some(Utc::now());
        Ok(&self.jobs)
    }

    /// Current snapshot.
    #[must_use]
    pub fn jobs(&self) -> &[JobApplication] {
        &self.jobs
    }

    /// When the snapshot was last replaced.
    #[must_use]
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&JobApplication> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Drop a record from the snapshot.
    pub fn remove(&mut self, id: &str) -> Option<JobApplication> {
        let pos = self.jobs.iter().position(|j| j.id == id)?;
        Some(self.jobs.remove(pos))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::JobService;
    use crate::model::{JobPayload, JobStatus};
    use crate::storage::SqliteStore;

    fn payload(company: &str) -> JobPayload {
        JobPayload {
            company_name: Some(company.to_string()),
            job_title: Some("Engineer".to_string()),
            application_date: Some("2024-01-01".to_string()),
            status: Some("Applied".to_string()),
            ..JobPayload::default()
        }
    }

    #[tokio::test]
    async fn test_refresh_replaces_snapshot() {
        let svc = JobService::new(SqliteStore::open_memory().unwrap());
        let mut cache = JobCache::new();
        assert!(cache.refreshed_at().is_none());

        svc.create(&payload("Acme")).unwrap();
        assert_eq!(cache.refresh(&svc).await.unwrap().len(), 1);

        // Stale until the next refresh
        svc.create(&payload("Globex")).unwrap();
        assert_eq!(cache.len(), 1);

        cache.refresh(&svc).await.unwrap();
        assert_eq!(cache.len(), 2);
        assert!(cache.refreshed_at().is_some());
    }

    #[tokio::test]
    async fn test_get_and_remove() {
        let svc = JobService::new(SqliteStore::open_memory().unwrap());
        let created = svc.create(&payload("Acme")).unwrap();

        let mut cache = JobCache::new();
        cache.refresh(&svc).await.unwrap();
        assert_eq!(cache.get(&created.id).unwrap().status, JobStatus::Applied);

        assert!(cache.remove(&created.id).is_some());
        assert!(cache.remove(&created.id).is_none());
        assert!(cache.is_empty());
    }
}
