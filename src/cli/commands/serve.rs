//! Serve command implementation.

use crate::api::{listen, JobService};
use crate::config::{resolve_db_path, resolve_listen_addr};
use crate::error::{Error, Result};
use crate::storage::SqliteStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Open the database and run the job API until interrupted.
///
/// # Errors
///
/// Returns `Config` for a bad listen address or database location, a store
/// error if the database cannot be opened, or an I/O error if binding fails.
pub fn execute(listen_addr: Option<&str>, db_path: Option<&PathBuf>) -> Result<()> {
    let addr = resolve_listen_addr(listen_addr)?;
    let db_path = resolve_db_path(db_path.map(|p| p.as_path()))
        .ok_or_else(|| Error::Config("could not determine database path".to_string()))?;

    let store = SqliteStore::open(&db_path)?;
    info!(path = %db_path.display(), "Serving job store");
    let service = Arc::new(JobService::new(store));

    super::block_on(listen(addr, service))?
}
