//! SQLite storage implementation.
//!
//! Writes go through [`SqliteStore::mutate`], which wraps each operation in
//! an IMMEDIATE transaction so a merge-update or a find-then-delete is a
//! single store call with no visible gap.

use crate::error::{Error, Result};
use crate::model::{new_job_id, JobApplication, JobPatch, NewJob};
use crate::storage::schema::apply_schema;
use crate::storage::JobStore;
use crate::validate::normalize_status;
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Transaction};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Storage format for `application_date`.
const DATE_FORMAT: &str = "%Y-%m-%d";

const JOB_COLUMNS: &str =
    "id, company_name, job_title, application_date, status, job_description, notes";

/// SQLite-based record store.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database at the given path.
    ///
    /// Creates the database and applies schema if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_timeout(path, None)
    }

    /// Open a database with an optional busy timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open_with_timeout(path: &Path, timeout_ms: Option<u64>) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_millis(timeout_ms.unwrap_or(5000)))?;

        apply_schema(&conn)?;
        debug!(path = %path.display(), "Opened job store");
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Execute a mutation inside an IMMEDIATE transaction.
    ///
    /// The transaction is rolled back if the closure fails.
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails.
    pub fn mutate<F, R>(&mut self, op: &str, f: F) -> Result<R>
    where
        F: FnOnce(&Transaction) -> Result<R>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;

        let result = f(&tx)?;
        tx.commit()?;

        debug!(op, "Mutation committed");
        Ok(result)
    }
}

impl JobStore for SqliteStore {
    fn insert(&mut self, job: NewJob) -> Result<JobApplication> {
        let record = job.into_record(new_job_id());
        let now = chrono::Utc::now().timestamp_millis();

        self.mutate("insert_job", |tx| {
            tx.execute(
                "INSERT INTO jobs (id, company_name, job_title, application_date, status, job_description, notes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
                rusqlite::params![
                    record.id,
                    record.company_name,
                    record.job_title,
                    record.application_date.format(DATE_FORMAT).to_string(),
                    record.status.as_str(),
                    record.job_description,
                    record.notes,
                    now
                ],
            )?;
            Ok(())
        })?;

        Ok(record)
    }

    fn find_all(&self) -> Result<Vec<JobApplication>> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM jobs ORDER BY rowid");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], map_job_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<JobApplication>> {
        fetch_job(&self.conn, id)
    }

    fn update_by_id(&mut self, id: &str, patch: &JobPatch) -> Result<Option<JobApplication>> {
        let now = chrono::Utc::now().timestamp_millis();

        // Build dynamic UPDATE query based on provided fields
        let mut set_clauses = vec!["updated_at = ?"];
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(now)];

        if let Some(company) = &patch.company_name {
            set_clauses.push("company_name = ?");
            params.push(Box::new(company.clone()));
        }
        if let Some(title) = &patch.job_title {
            set_clauses.push("job_title = ?");
            params.push(Box::new(title.clone()));
        }
        if let Some(date) = patch.application_date {
            set_clauses.push("application_date = ?");
            params.push(Box::new(date.format(DATE_FORMAT).to_string()));
        }
        if let Some(status) = patch.status {
            set_clauses.push("status = ?");
            params.push(Box::new(status.as_str()));
        }
        if let Some(desc) = &patch.job_description {
            set_clauses.push("job_description = ?");
            params.push(Box::new(desc.clone()));
        }
        if let Some(notes) = &patch.notes {
            set_clauses.push("notes = ?");
            params.push(Box::new(notes.clone()));
        }

        params.push(Box::new(id.to_string()));
        let sql = format!("UPDATE jobs SET {} WHERE id = ?", set_clauses.join(", "));

        self.mutate("update_job", |tx| {
            let params_refs: Vec<&dyn rusqlite::ToSql> =
                params.iter().map(|b| b.as_ref()).collect();
            let rows = tx.execute(&sql, params_refs.as_slice())?;

            if rows == 0 {
                return Ok(None);
            }
            fetch_job(tx, id)
        })
    }

    fn delete_by_id(&mut self, id: &str) -> Result<Option<JobApplication>> {
        self.mutate("delete_job", |tx| {
            let Some(job) = fetch_job(tx, id)? else {
                return Ok(None);
            };
            tx.execute("DELETE FROM jobs WHERE id = ?1", [id])?;
            Ok(Some(job))
        })
    }

    fn ping(&self) -> Result<()> {
        self.conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }
}

fn fetch_job(conn: &Connection, id: &str) -> Result<Option<JobApplication>> {
    let sql = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = ?1");
    let job = conn.query_row(&sql, [id], map_job_row).optional()?;
    Ok(job)
}

fn map_job_row(row: &rusqlite::Row) -> rusqlite::Result<JobApplication> {
    let raw_date: String = row.get(3)?;
    let application_date = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    let raw_status: String = row.get(4)?;
    let status = normalize_status(&raw_status).map_err(|(s, _)| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            Type::Text,
            format!("unknown status '{s}'").into(),
        )
    })?;

    Ok(JobApplication {
        id: row.get(0)?,
        company_name: row.get(1)?,
        job_title: row.get(2)?,
        application_date,
        status,
        job_description: row.get(5)?,
        notes: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::JobStatus;

    fn new_job(company: &str, date: (i32, u32, u32), status: JobStatus) -> NewJob {
        NewJob {
            company_name: company.to_string(),
            job_title: "Engineer".to_string(),
            application_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            status,
            job_description: Some("Build things".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_open_memory() {
        let store = SqliteStore::open_memory();
        assert!(store.is_ok());
        assert!(store.unwrap().ping().is_ok());
    }

    #[test]
    fn test_job_crud() {
        let mut store = SqliteStore::open_memory().unwrap();

        // Create
        let created = store
            .insert(new_job("Acme", (2024, 1, 1), JobStatus::Applied))
            .unwrap();
        assert!(created.id.starts_with("job_"));

        // Read
        let found = store.find_by_id(&created.id).unwrap();
        assert_eq!(found.as_ref(), Some(&created));

        // List
        store
            .insert(new_job("Globex", (2024, 1, 10), JobStatus::Offered))
            .unwrap();
        let all = store.find_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].company_name, "Acme");

        // Update
        let patch = JobPatch {
            status: Some(JobStatus::Interviewing),
            ..JobPatch::default()
        };
        let updated = store.update_by_id(&created.id, &patch).unwrap().unwrap();
        assert_eq!(updated.status, JobStatus::Interviewing);
        assert_eq!(updated.company_name, "Acme");
        assert_eq!(updated.job_description.as_deref(), Some("Build things"));

        // Delete
        let deleted = store.delete_by_id(&created.id).unwrap().unwrap();
        assert_eq!(deleted.id, created.id);
        assert_eq!(store.find_by_id(&created.id).unwrap(), None);
        assert_eq!(store.find_all().unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_ids_yield_none() {
        let mut store = SqliteStore::open_memory().unwrap();
        let patch = JobPatch {
            notes: Some("x".to_string()),
            ..JobPatch::default()
        };

        assert_eq!(store.find_by_id("bogus-id").unwrap(), None);
        assert_eq!(store.update_by_id("bogus-id", &patch).unwrap(), None);
        assert_eq!(store.delete_by_id("bogus-id").unwrap(), None);
    }

    #[test]
    fn test_empty_patch_keeps_record() {
        let mut store = SqliteStore::open_memory().unwrap();
        let created = store
            .insert(new_job("Acme", (2024, 1, 1), JobStatus::Applied))
            .unwrap();

        let same = store
            .update_by_id(&created.id, &JobPatch::default())
            .unwrap()
            .unwrap();
        assert_eq!(same, created);
    }

    #[test]
    fn test_update_date_and_optional_fields() {
        let mut store = SqliteStore::open_memory().unwrap();
        let created = store
            .insert(new_job("Acme", (2024, 1, 1), JobStatus::Applied))
            .unwrap();

        let patch = JobPatch {
            application_date: NaiveDate::from_ymd_opt(2024, 3, 5),
            notes: Some("Recruiter called".to_string()),
            ..JobPatch::default()
        };
        let updated = store.update_by_id(&created.id, &patch).unwrap().unwrap();
        assert_eq!(updated.application_date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(updated.notes.as_deref(), Some("Recruiter called"));
        assert_eq!(updated.job_title, created.job_title);
    }

    #[test]
    fn test_open_file_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("jobs.db");

        let id = {
            let mut store = SqliteStore::open(&path).unwrap();
            store
                .insert(new_job("Acme", (2024, 1, 1), JobStatus::Applied))
                .unwrap()
                .id
        };

        let store = SqliteStore::open(&path).unwrap();
        assert!(store.find_by_id(&id).unwrap().is_some());
    }
}
