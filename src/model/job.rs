//! Job application model.
//!
//! A job application is the only persisted entity. The wire format is
//! camelCase JSON with the application date rendered as `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Application status values.
///
/// Closed set; unrecognised values are rejected at the service boundary.
/// Any transition between statuses is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    Applied,
    Interviewing,
    Rejected,
    Offered,
}

impl JobStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 4] = [
        Self::Applied,
        Self::Interviewing,
        Self::Rejected,
        Self::Offered,
    ];

    /// Get the string representation for storage and the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Interviewing => "Interviewing",
            Self::Rejected => "Rejected",
            Self::Offered => "Offered",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::validate::parse_status(s)
    }
}

/// A persisted job application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    /// Store-assigned identifier (`job_<hex>`), immutable
    pub id: String,

    /// Company applied to
    pub company_name: String,

    /// Position title
    pub job_title: String,

    /// Calendar date the application was sent
    pub application_date: NaiveDate,

    /// Current status
    pub status: JobStatus,

    /// Optional posting text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,

    /// Optional free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Untyped request body for create and update.
///
/// Every field is optional so validation can report exactly which field is
/// missing or malformed instead of failing the whole body at decode time.
/// Absent fields are skipped on serialization, which makes the same type
/// usable as a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl JobPayload {
    /// Payload carrying every field of an existing record.
    #[must_use]
    pub fn from_record(job: &JobApplication) -> Self {
        Self {
            company_name: Some(job.company_name.clone()),
            job_title: Some(job.job_title.clone()),
            application_date: Some(job.application_date.format("%Y-%m-%d").to_string()),
            status: Some(job.status.as_str().to_string()),
            job_description: job.job_description.clone(),
            notes: job.notes.clone(),
        }
    }
}

/// A validated create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub company_name: String,
    pub job_title: String,
    pub application_date: NaiveDate,
    pub status: JobStatus,
    pub job_description: Option<String>,
    pub notes: Option<String>,
}

impl NewJob {
    /// Attach a store-assigned identifier.
    #[must_use]
    pub fn into_record(self, id: String) -> JobApplication {
        JobApplication {
            id,
            company_name: self.company_name,
            job_title: self.job_title,
            application_date: self.application_date,
            status: self.status,
            job_description: self.job_description,
            notes: self.notes,
        }
    }
}

/// A validated partial update. `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPatch {
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub application_date: Option<NaiveDate>,
    pub status: Option<JobStatus>,
    pub job_description: Option<String>,
    pub notes: Option<String>,
}

impl JobPatch {
    /// True when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.job_title.is_none()
            && self.application_date.is_none()
            && self.status.is_none()
            && self.job_description.is_none()
            && self.notes.is_none()
    }
}

/// Generate a fresh record identifier.
#[must_use]
pub fn new_job_id() -> String {
    format!("job_{}", uuid::Uuid::new_v4().simple())
}
