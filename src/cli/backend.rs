//! Backend selection for CLI commands: remote server or local database.

use tracing::debug;

use crate::api::JobService;
use crate::cli::Cli;
use crate::client::{JobApi, JobClient};
use crate::config::{resolve_db_path, resolve_server_url, resolve_timeout};
use crate::error::{Error, Result};
use crate::model::{JobApplication, JobPayload};
use crate::storage::SqliteStore;

/// Where CLI commands send job operations.
#[derive(Debug)]
pub enum Backend {
    /// A running `jt serve` instance.
    Remote(JobClient),
    /// The database file, served in-process.
    Local(JobService<SqliteStore>),
}

impl Backend {
    /// Build the backend the global flags ask for.
    ///
    /// # Errors
    ///
    /// Returns `Config` for an unusable URL or database location, or a store
    /// error if the local database cannot be opened.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if cli.local {
            let db_path = resolve_db_path(cli.db.as_deref())
                .ok_or_else(|| Error::Config("could not determine database path".to_string()))?;
            debug!(path = %db_path.display(), "Using local database");
            let store = SqliteStore::open(&db_path)?;
            return Ok(Self::Local(JobService::new(store)));
        }

        let client = JobClient::new(&resolve_server_url(cli.url.as_deref()), resolve_timeout()?)?;
        debug!(url = %client.base_url(), "Using job API server");
        Ok(Self::Remote(client))
    }
}

impl JobApi for Backend {
    async fn create_job(&self, payload: &JobPayload) -> Result<JobApplication> {
        match self {
            Self::Remote(client) => client.create_job(payload).await,
            Self::Local(service) => service.create_job(payload).await,
        }
    }

    async fn list_jobs(&self) -> Result<Vec<JobApplication>> {
        match self {
            Self::Remote(client) => client.list_jobs().await,
            Self::Local(service) => service.list_jobs().await,
        }
    }

    async fn get_job(&self, id: &str) -> Result<JobApplication> {
        match self {
            Self::Remote(client) => client.get_job(id).await,
            Self::Local(service) => service.get_job(id).await,
        }
    }

    async fn update_job(&self, id: &str, payload: &JobPayload) -> Result<JobApplication> {
        match self {
            Self::Remote(client) => client.update_job(id, payload).await,
            Self::Local(service) => service.update_job(id, payload).await,
        }
    }

    async fn delete_job(&self, id: &str) -> Result<JobApplication> {
        match self {
            Self::Remote(client) => client.delete_job(id).await,
            Self::Local(service) => service.delete_job(id).await,
        }
    }
}
