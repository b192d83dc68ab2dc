//! Input validation for job payloads.
//!
//! Two-tier status resolution: case-insensitive exact match, then an error
//! carrying the closest valid status as a suggestion. Dates accept
//! `YYYY-MM-DD` or an RFC 3339 timestamp.

use chrono::{DateTime, NaiveDate};

use crate::error::{Error, ErrorCode, Result};
use crate::model::{JobPatch, JobPayload, JobStatus, NewJob};

/// Normalize a status string via case-insensitive match.
///
/// Returns the canonical status, or an error with the original input
/// and an optional suggestion.
pub fn normalize_status(input: &str) -> std::result::Result<JobStatus, (String, Option<String>)> {
    let trimmed = input.trim();

    if let Some(status) = JobStatus::ALL
        .into_iter()
        .find(|s| s.as_str().eq_ignore_ascii_case(trimmed))
    {
        return Ok(status);
    }

    let lower = trimmed.to_lowercase();
    let suggestion = JobStatus::ALL
        .into_iter()
        .map(|s| (s, levenshtein_distance(&lower, &s.as_str().to_lowercase())))
        .filter(|(_, dist)| *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(s, _)| s.as_str().to_string());

    Err((input.to_string(), suggestion))
}

/// Parse a status, producing a validation error on failure.
pub fn parse_status(input: &str) -> Result<JobStatus> {
    normalize_status(input).map_err(|(original, suggestion)| {
        let mut message = format!(
            "unknown status '{original}' (expected one of: Applied, Interviewing, Rejected, Offered)"
        );
        if let Some(s) = suggestion {
            message.push_str(&format!("; did you mean '{s}'?"));
        }
        Error::validation(ErrorCode::InvalidStatus, "status", message)
    })
}

/// Parse an application date.
///
/// Accepts a calendar date (`2024-01-31`) or an RFC 3339 timestamp, in which
/// case the date is taken as written in the timestamp's own offset.
pub fn parse_application_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.date_naive());
    }

    Err(Error::validation(
        ErrorCode::InvalidDate,
        "applicationDate",
        format!("'{input}' is not a valid date"),
    ))
}

/// Require a present, non-blank text field.
///
/// Blankness is judged after trimming, but the value is kept as sent.
fn required_text(field: &str, value: Option<&str>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        Some(_) => Err(Error::validation(
            ErrorCode::RequiredField,
            field,
            "must not be empty",
        )),
        None => Err(Error::validation(ErrorCode::RequiredField, field, "is required")),
    }
}

/// Reject a supplied-but-blank value for a required field.
fn non_blank(field: &str, value: Option<&str>) -> Result<Option<String>> {
    value.map(|v| required_text(field, Some(v))).transpose()
}

/// Validate a create payload.
///
/// Required fields are checked in wire order so the first failure reported
/// is stable for a given payload.
pub fn validate_new_job(payload: &JobPayload) -> Result<NewJob> {
    let company_name = required_text("companyName", payload.company_name.as_deref())?;
    let job_title = required_text("jobTitle", payload.job_title.as_deref())?;
    let raw_date = required_text("applicationDate", payload.application_date.as_deref())?;
    let application_date = parse_application_date(&raw_date)?;
    let raw_status = required_text("status", payload.status.as_deref())?;
    let status = parse_status(&raw_status)?;

    Ok(NewJob {
        company_name,
        job_title,
        application_date,
        status,
        job_description: payload.job_description.clone(),
        notes: payload.notes.clone(),
    })
}

/// Validate a partial update payload.
///
/// Each supplied field obeys the same rules as on create, so the merged
/// record stays structurally valid. Absent fields are left untouched.
pub fn validate_patch(payload: &JobPayload) -> Result<JobPatch> {
    let company_name = non_blank("companyName", payload.company_name.as_deref())?;
    let job_title = non_blank("jobTitle", payload.job_title.as_deref())?;
    let application_date = non_blank("applicationDate", payload.application_date.as_deref())?
        .map(|d| parse_application_date(&d))
        .transpose()?;
    let status = non_blank("status", payload.status.as_deref())?
        .map(|s| parse_status(&s))
        .transpose()?;

    Ok(JobPatch {
        company_name,
        job_title,
        application_date,
        status,
        job_description: payload.job_description.clone(),
        notes: payload.notes.clone(),
    })
}

// ── Levenshtein distance ─────────────────────────────────────

/// Compute the Levenshtein edit distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single-row optimization
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> JobPayload {
        JobPayload {
            company_name: Some("Acme".to_string()),
            job_title: Some("Engineer".to_string()),
            application_date: Some("2024-01-10".to_string()),
            status: Some("Applied".to_string()),
            job_description: None,
            notes: None,
        }
    }

    #[test]
    fn test_normalize_status() {
        assert_eq!(normalize_status("Applied"), Ok(JobStatus::Applied));
        assert_eq!(normalize_status("offered"), Ok(JobStatus::Offered));
        assert_eq!(normalize_status(" INTERVIEWING "), Ok(JobStatus::Interviewing));
        let (_, suggestion) = normalize_status("rejectd").unwrap_err();
        assert_eq!(suggestion.as_deref(), Some("Rejected"));
        let (_, suggestion) = normalize_status("ghosted").unwrap_err();
        assert_eq!(suggestion, None);
    }

    #[test]
    fn test_parse_application_date() {
        let jan10 = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(parse_application_date("2024-01-10").unwrap(), jan10);
        assert_eq!(parse_application_date("2024-01-10T23:30:00-05:00").unwrap(), jan10);
        assert_eq!(parse_application_date("2024-01-10T00:00:00.000Z").unwrap(), jan10);
        assert!(parse_application_date("2024-02-30").is_err());
        assert!(parse_application_date("next tuesday").is_err());
    }

    #[test]
    fn test_validate_new_job() {
        let job = validate_new_job(&valid_payload()).unwrap();
        assert_eq!(job.company_name, "Acme");
        assert_eq!(job.status, JobStatus::Applied);
    }

    #[test]
    fn test_validate_new_job_missing_and_empty() {
        let mut payload = valid_payload();
        payload.company_name = None;
        let err = validate_new_job(&payload).unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::RequiredField);
        assert!(err.to_string().starts_with("companyName"));

        let mut payload = valid_payload();
        payload.job_title = Some("   ".to_string());
        let err = validate_new_job(&payload).unwrap_err();
        assert!(err.to_string().starts_with("jobTitle"));
    }

    #[test]
    fn test_text_fields_are_kept_as_sent() {
        let mut payload = valid_payload();
        payload.company_name = Some("  Acme Corp ".to_string());
        payload.job_title = Some("Engineer\n".to_string());
        let job = validate_new_job(&payload).unwrap();
        assert_eq!(job.company_name, "  Acme Corp ");
        assert_eq!(job.job_title, "Engineer\n");

        let patch = validate_patch(&JobPayload {
            job_title: Some(" Staff Engineer".to_string()),
            ..JobPayload::default()
        })
        .unwrap();
        assert_eq!(patch.job_title.as_deref(), Some(" Staff Engineer"));
    }

    #[test]
    fn test_validate_new_job_bad_date_and_status() {
        let mut payload = valid_payload();
        payload.application_date = Some("not-a-date".to_string());
        assert_eq!(
            validate_new_job(&payload).unwrap_err().error_code(),
            ErrorCode::InvalidDate
        );

        let mut payload = valid_payload();
        payload.status = Some("Ghosted".to_string());
        assert_eq!(
            validate_new_job(&payload).unwrap_err().error_code(),
            ErrorCode::InvalidStatus
        );
    }

    #[test]
    fn test_validate_patch() {
        assert!(validate_patch(&JobPayload::default()).unwrap().is_empty());

        let patch = validate_patch(&JobPayload {
            status: Some("offered".to_string()),
            ..JobPayload::default()
        })
        .unwrap();
        assert_eq!(patch.status, Some(JobStatus::Offered));
        assert_eq!(patch.company_name, None);

        let err = validate_patch(&JobPayload {
            company_name: Some(String::new()),
            ..JobPayload::default()
        })
        .unwrap_err();
        assert!(err.is_validation());

        let err = validate_patch(&JobPayload {
            application_date: Some("32/13/2024".to_string()),
            ..JobPayload::default()
        })
        .unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::InvalidDate);
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", "abd"), 1);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }
}
