//! Job Tracker - track job applications through a small REST API
//!
//! This crate provides the server, client SDK and engines behind the `jt` CLI.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (`JobApplication`, `JobStatus`, payloads)
//! - [`validate`] - Payload validation and status/date parsing
//! - [`storage`] - SQLite record store
//! - [`api`] - Job service and its axum HTTP surface
//! - [`client`] - HTTP SDK, cache, query, selection and export engines
//! - [`config`] - Configuration management
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod storage;
pub mod validate;

pub use error::{Error, Result};

/// Global CSV output flag (set when `--format csv`).
pub static CSV_OUTPUT: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Check if CSV output is requested.
#[inline]
pub fn is_csv() -> bool {
    CSV_OUTPUT.load(std::sync::atomic::Ordering::Relaxed)
}

/// Escape a value for CSV output (wrap in quotes if it contains a comma, quote, or line break).
#[must_use]
pub fn csv_escape(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::csv_escape;

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("line\r\nbreak"), "\"line\r\nbreak\"");
        assert_eq!(csv_escape(""), "");
    }
}
