//! Configuration management.
//!
//! Resolves where the CLI keeps its database, which server it talks to, and
//! where `jt serve` listens.
//!
//! Every setting follows the same priority:
//! 1. Explicit value (CLI flag)
//! 2. Environment variable
//! 3. Built-in default
//!
//! The database defaults to `~/.jobtracker/data/jobs.db`.

use crate::error::{Error, Result};

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default server the client SDK talks to.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Default address `jt serve` binds.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";

/// Get the global job tracker directory location (`~/.jobtracker/`).
#[must_use]
pub fn global_jobtracker_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".jobtracker"))
}

/// Read a non-blank environment variable.
fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolve the database path.
///
/// Priority:
/// 1. If `explicit_path` is provided, use it directly
/// 2. `JT_DB` environment variable
/// 3. Global location: `~/.jobtracker/data/jobs.db`
///
/// Returns `None` if no home directory can be determined.
#[must_use]
pub fn resolve_db_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    if let Some(db_path) = env_value("JT_DB") {
        return Some(PathBuf::from(db_path));
    }

    global_jobtracker_dir().map(|dir| dir.join("data").join("jobs.db"))
}

/// Resolve the job API base URL (flag, then `JT_URL`, then the default).
#[must_use]
pub fn resolve_server_url(explicit: Option<&str>) -> String {
    explicit
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| env_value("JT_URL"))
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
}

/// Resolve the address the server binds (flag, then `JT_LISTEN`, then the default).
///
/// # Errors
///
/// Returns `Config` if the chosen value is not a socket address.
pub fn resolve_listen_addr(explicit: Option<&str>) -> Result<SocketAddr> {
    let raw = explicit
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| env_value("JT_LISTEN"))
        .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());

    raw.parse()
        .map_err(|e| Error::Config(format!("invalid listen address '{raw}': {e}")))
}

/// Resolve the SDK request timeout from `JT_TIMEOUT_SECS`.
///
/// Unset or `0` means no timeout.
///
/// # Errors
///
/// Returns `Config` if the variable is not a whole number of seconds.
pub fn resolve_timeout() -> Result<Option<Duration>> {
    parse_timeout(env_value("JT_TIMEOUT_SECS").as_deref())
}

fn parse_timeout(raw: Option<&str>) -> Result<Option<Duration>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let secs: u64 = raw
        .parse()
        .map_err(|_| Error::Config(format!("JT_TIMEOUT_SECS must be a whole number, got '{raw}'")))?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}
