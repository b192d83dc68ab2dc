//! Database schema definitions.
//!
//! One collection of job documents keyed by the store-assigned identifier.
//! No secondary indexes: filtering happens client-side.

use rusqlite::{Connection, Result};

/// Current schema version for migration tracking.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// The complete SQL schema for the Job Tracker database.
///
/// Timestamps are INTEGER (Unix milliseconds). `application_date` is TEXT in
/// `YYYY-MM-DD` form so it sorts and compares lexically.
pub const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS schema_migrations (
    version TEXT PRIMARY KEY,
    applied_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS jobs (
    id TEXT PRIMARY KEY,
    company_name TEXT NOT NULL CHECK (length(trim(company_name)) > 0),
    job_title TEXT NOT NULL CHECK (length(trim(job_title)) > 0),
    application_date TEXT NOT NULL,
    status TEXT NOT NULL CHECK (status IN ('Applied', 'Interviewing', 'Rejected', 'Offered')),
    job_description TEXT,
    notes TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);
";

/// Apply pragmas and the schema, then record the schema version.
///
/// Idempotent; safe to call on every open.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "temp_store", "MEMORY")?;

    conn.execute_batch(SCHEMA_SQL)?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
        rusqlite::params![
            format!("v{CURRENT_SCHEMA_VERSION}"),
            chrono::Utc::now().timestamp_millis()
        ],
    )?;

    Ok(())
}
