//! In-process backend: the service answers client calls directly.

use super::JobApi;
use crate::api::JobService;
use crate::error::Result;
use crate::model::{JobApplication, JobPayload};
use crate::storage::JobStore;

impl<S: JobStore> JobApi for JobService<S> {
    async fn create_job(&self, payload: &JobPayload) -> Result<JobApplication> {
        self.create(payload)
    }

    async fn list_jobs(&self) -> Result<Vec<JobApplication>> {
        self.list_all()
    }

    async fn get_job(&self, id: &str) -> Result<JobApplication> {
        self.get_by_id(id)
    }

    async fn update_job(&self, id: &str, payload: &JobPayload) -> Result<JobApplication> {
        self.update_by_id(id, payload)
    }

    async fn delete_job(&self, id: &str) -> Result<JobApplication> {
        self.delete_by_id(id)
    }
}
