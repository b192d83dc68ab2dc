//! Error types for Job Tracker.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=store, 3=not_found, 4=validation, etc.)
//! - HTTP status mapping for the REST surface
//! - Context-aware recovery hints
//! - Structured JSON output shared by HTTP error bodies and `--json` mode

use thiserror::Error;

/// Result type alias for Job Tracker operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Store (exit 2)
    StoreFault,

    // Not Found (exit 3)
    JobNotFound,

    // Validation (exit 4)
    RequiredField,
    InvalidDate,
    InvalidStatus,
    InvalidBody,
    InvalidArgument,

    // Transport (exit 6)
    TransportFault,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::StoreFault => "STORE_FAULT",
            Self::JobNotFound => "JOB_NOT_FOUND",
            Self::RequiredField => "REQUIRED_FIELD",
            Self::InvalidDate => "INVALID_DATE",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::InvalidBody => "INVALID_BODY",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::TransportFault => "TRANSPORT_FAULT",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Parse a code string received in an error envelope.
    #[must_use]
    pub fn from_code_str(s: &str) -> Option<Self> {
        let code = match s {
            "STORE_FAULT" => Self::StoreFault,
            "JOB_NOT_FOUND" => Self::JobNotFound,
            "REQUIRED_FIELD" => Self::RequiredField,
            "INVALID_DATE" => Self::InvalidDate,
            "INVALID_STATUS" => Self::InvalidStatus,
            "INVALID_BODY" => Self::InvalidBody,
            "INVALID_ARGUMENT" => Self::InvalidArgument,
            "TRANSPORT_FAULT" => Self::TransportFault,
            "CONFIG_ERROR" => Self::ConfigError,
            "IO_ERROR" => Self::IoError,
            "JSON_ERROR" => Self::JsonError,
            "INTERNAL_ERROR" => Self::InternalError,
            _ => return None,
        };
        Some(code)
    }

    /// Category-based exit code (1-8).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::StoreFault => 2,
            Self::JobNotFound => 3,
            Self::RequiredField
            | Self::InvalidDate
            | Self::InvalidStatus
            | Self::InvalidBody
            | Self::InvalidArgument => 4,
            Self::TransportFault => 6,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// HTTP status code used when this error leaves the REST surface.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::JobNotFound => 404,
            Self::RequiredField
            | Self::InvalidDate
            | Self::InvalidStatus
            | Self::InvalidBody
            | Self::InvalidArgument => 400,
            Self::StoreFault
            | Self::TransportFault
            | Self::ConfigError
            | Self::IoError
            | Self::JsonError
            | Self::InternalError => 500,
        }
    }

    /// Whether the caller may retry.
    ///
    /// Store and transport faults are transient; validation errors need
    /// corrected input instead, and not-found never resolves by itself.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreFault | Self::TransportFault)
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in Job Tracker operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{field}: {message}")]
    Validation {
        code: ErrorCode,
        field: String,
        message: String,
    },

    #[error("Job not found: {id}")]
    NotFound { id: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Store fault: {0}")]
    StoreFault(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a validation error for a single field.
    pub fn validation(code: ErrorCode, field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Build a not-found error for an identifier.
    pub fn not_found(id: &str) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Validation { code, .. } => *code,
            Self::NotFound { .. } => ErrorCode::JobNotFound,
            Self::Database(_) | Self::StoreFault(_) => ErrorCode::StoreFault,
            Self::Transport(_) => ErrorCode::TransportFault,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// True for missing/empty fields, bad dates, unknown statuses and bad bodies.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// True when the identifier has no corresponding record.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NotFound { id } => Some(format!(
                "No job with ID '{id}'. Use `jt list` to see tracked applications."
            )),
            Self::Validation {
                code: ErrorCode::InvalidStatus,
                ..
            } => Some("Valid statuses: Applied, Interviewing, Rejected, Offered".to_string()),
            Self::Validation {
                code: ErrorCode::InvalidDate,
                ..
            } => Some("Dates use YYYY-MM-DD, e.g. 2024-01-31".to_string()),
            Self::Transport(_) => Some(
                "Is the server running? Start it with `jt serve`, or pass --local \
                 to work on the database directly."
                    .to_string(),
            ),
            Self::Validation { .. }
            | Self::Database(_)
            | Self::StoreFault(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::InvalidArgument(_)
            | Self::Config(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, retryability, exit code, and
    /// optional recovery hint.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Self::Validation { field, .. } = self {
            obj["error"]["field"] = serde_json::Value::String(field.clone());
        }

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = Error::validation(ErrorCode::RequiredField, "companyName", "is required");
        assert_eq!(err.error_code().http_status(), 400);
        assert_eq!(err.exit_code(), 4);
        assert_eq!(err.to_string(), "companyName: is required");
        assert!(!err.error_code().is_retryable());
    }

    #[test]
    fn test_store_fault_is_split_from_validation() {
        let err = Error::StoreFault("disk full".into());
        assert_eq!(err.error_code().http_status(), 500);
        assert!(err.error_code().is_retryable());
    }

    #[test]
    fn test_structured_json_envelope() {
        let err = Error::validation(ErrorCode::InvalidStatus, "status", "unknown status 'Ghosted'");
        let json = err.to_structured_json();
        assert_eq!(json["error"]["code"], "INVALID_STATUS");
        assert_eq!(json["error"]["field"], "status");
        assert_eq!(json["error"]["exit_code"], 4);
        assert!(json["error"]["hint"].is_string());
    }

    #[test]
    fn test_code_string_roundtrip() {
        for code in [
            ErrorCode::StoreFault,
            ErrorCode::JobNotFound,
            ErrorCode::InvalidDate,
            ErrorCode::InvalidBody,
        ] {
            assert_eq!(ErrorCode::from_code_str(code.as_str()), Some(code));
        }
        assert_eq!(ErrorCode::from_code_str("NOPE"), None);
    }
}
