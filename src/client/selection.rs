//! Selection set and batch delete.
//!
//! The selection keeps insertion order, which is also the order batch
//! operations visit identifiers in.

use tracing::{info, warn};

use super::{JobApi, JobCache};
use crate::error::Error;
use crate::model::JobApplication;

/// Identifiers currently marked for batch action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<String>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    /// Replace the selection with the given (filtered) identifiers.
    pub fn select_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids.clear();
        for id in ids {
            let id = id.into();
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    /// Select every record of a filtered view.
    pub fn select_view(&mut self, view: &[&JobApplication]) {
        self.select_all(view.iter().map(|j| j.id.as_str()));
    }

    /// Drop every selected identifier.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Deselect one identifier. Returns whether it was selected.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|s| s != id);
        self.ids.len() != before
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    /// Selected identifiers in selection order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// One identifier a batch operation could not process.
#[derive(Debug)]
pub struct BatchFailure {
    pub id: String,
    pub error: Error,
}

/// Aggregate outcome of a batch delete.
#[derive(Debug, Default)]
pub struct BatchDeleteReport {
    /// Records removed, in the order they were deleted.
    pub deleted: Vec<JobApplication>,
    /// Per-identifier failures, in selection order.
    pub failures: Vec<BatchFailure>,
}

impl BatchDeleteReport {
    /// True when every selected identifier was deleted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures caused by identifiers with no record.
    #[must_use]
    pub fn not_found_count(&self) -> usize {
        self.failures.iter().filter(|f| f.error.is_not_found()).count()
    }
}

/// Delete every selected identifier, one call at a time, in selection order.
///
/// A failure does not stop the batch. Each successfully deleted identifier is
/// removed from the cache and from the selection immediately, so a later
/// failure never undoes earlier progress. Failed identifiers stay selected.
pub async fn batch_delete<A: JobApi>(
    api: &A,
    cache: &mut JobCache,
    selection: &mut Selection,
) -> BatchDeleteReport {
    let mut report = BatchDeleteReport::default();
    let pending: Vec<String> = selection.ids().to_vec();

    for id in pending {
        match api.delete_job(&id).await {
            Ok(job) => {
                cache.remove(&id);
                selection.remove(&id);
                report.deleted.push(job);
            }
            Err(error) => {
                warn!(id = %id, "Batch delete failed: {error}");
                report.failures.push(BatchFailure { id, error });
            }
        }
    }

    info!(
        deleted = report.deleted.len(),
        failed = report.failures.len(),
        "Batch delete finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::JobService;
    use crate::error::Result;
    use crate::model::JobPayload;
    use crate::storage::SqliteStore;
    use std::sync::Mutex;

    fn payload(company: &str, date: &str) -> JobPayload {
        JobPayload {
            company_name: Some(company.to_string()),
            job_title: Some("Engineer".to_string()),
            application_date: Some(date.to_string()),
            status: Some("Applied".to_string()),
            ..JobPayload::default()
        }
    }

    #[test]
    fn test_toggle() {
        let mut sel = Selection::new();
        assert!(sel.toggle("a"));
        assert!(sel.toggle("b"));
        assert!(!sel.toggle("a"));
        assert_eq!(sel.ids(), ["b".to_string()]);
    }

    #[test]
    fn test_select_all_and_clear() {
        let mut sel = Selection::new();
        sel.toggle("stale");
        sel.select_all(["x", "y", "x"]);
        assert_eq!(sel.ids(), ["x".to_string(), "y".to_string()]);
        assert!(!sel.contains("stale"));

        sel.clear();
        assert!(sel.is_empty());
    }

    #[test]
    fn test_selection_follows_filtered_view() {
        use crate::client::FilterSpec;
        use crate::model::JobStatus;
        use chrono::NaiveDate;

        let job = |id: &str, status| JobApplication {
            id: id.to_string(),
            company_name: "Acme".to_string(),
            job_title: "Engineer".to_string(),
            application_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            status,
            job_description: None,
            notes: None,
        };
        let jobs = vec![job("a", JobStatus::Applied), job("b", JobStatus::Offered)];

        let mut sel = Selection::new();
        sel.select_view(&FilterSpec::default().apply(&jobs));
        assert_eq!(sel.len(), 2);

        let offered = FilterSpec {
            status: Some(JobStatus::Offered),
            ..FilterSpec::default()
        };
        sel.select_view(&offered.apply(&jobs));
        assert_eq!(sel.ids(), ["b".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_selected_with_bogus_id() {
        let svc = JobService::new(SqliteStore::open_memory().unwrap());
        let a = svc.create(&payload("Acme", "2024-01-01")).unwrap();
        let b = svc.create(&payload("Globex", "2024-01-10")).unwrap();

        let mut cache = JobCache::new();
        cache.refresh(&svc).await.unwrap();

        let mut sel = Selection::new();
        sel.toggle(&a.id);
        sel.toggle("bogus-id");

        let report = batch_delete(&svc, &mut cache, &mut sel).await;

        assert_eq!(report.deleted.len(), 1);
        assert_eq!(report.deleted[0].id, a.id);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].id, "bogus-id");
        assert_eq!(report.not_found_count(), 1);
        assert!(!report.is_complete());

        assert!(cache.get(&a.id).is_none());
        assert!(cache.get(&b.id).is_some());
        assert_eq!(sel.ids(), ["bogus-id".to_string()]);

        let remaining = svc.list_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);
    }

    /// Backend that fails the first delete it sees and records call order.
    struct FlakyBackend {
        inner: JobService<SqliteStore>,
        calls: Mutex<Vec<String>>,
    }

    impl JobApi for FlakyBackend {
        async fn create_job(&self, payload: &JobPayload) -> Result<JobApplication> {
            self.inner.create(payload)
        }

        async fn list_jobs(&self) -> Result<Vec<JobApplication>> {
            self.inner.list_all()
        }

        async fn get_job(&self, id: &str) -> Result<JobApplication> {
            self.inner.get_by_id(id)
        }

        async fn update_job(&self, id: &str, payload: &JobPayload) -> Result<JobApplication> {
            self.inner.update_by_id(id, payload)
        }

        async fn delete_job(&self, id: &str) -> Result<JobApplication> {
            let first = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(id.to_string());
                calls.len() == 1
            };
            if first {
                return Err(Error::StoreFault("connection reset".to_string()));
            }
            self.inner.delete_by_id(id)
        }
    }

    #[tokio::test]
    async fn test_batch_continues_after_failure_in_selection_order() {
        let backend = FlakyBackend {
            inner: JobService::new(SqliteStore::open_memory().unwrap()),
            calls: Mutex::new(Vec::new()),
        };
        let a = backend.inner.create(&payload("Acme", "2024-01-01")).unwrap();
        let b = backend.inner.create(&payload("Globex", "2024-01-10")).unwrap();
        let c = backend.inner.create(&payload("Initech", "2024-02-01")).unwrap();

        let mut cache = JobCache::new();
        cache.refresh(&backend).await.unwrap();

        let mut sel = Selection::new();
        sel.select_all([c.id.clone(), a.id.clone(), b.id.clone()]);

        let report = batch_delete(&backend, &mut cache, &mut sel).await;

        assert_eq!(
            *backend.calls.lock().unwrap(),
            vec![c.id.clone(), a.id.clone(), b.id.clone()]
        );
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].id, c.id);
        assert_eq!(report.not_found_count(), 0);
        assert_eq!(report.deleted.len(), 2);

        assert_eq!(sel.ids(), [c.id.clone()]);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&c.id).is_some());
    }

    #[tokio::test]
    async fn test_empty_selection_is_noop() {
        let svc = JobService::new(SqliteStore::open_memory().unwrap());
        let mut cache = JobCache::new();
        let mut sel = Selection::new();

        let report = batch_delete(&svc, &mut cache, &mut sel).await;
        assert!(report.is_complete());
        assert!(report.deleted.is_empty());
    }
}
