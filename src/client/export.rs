//! Field-selectable CSV export of a selection.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use super::Selection;
use crate::csv_escape;
use crate::error::{Error, Result};
use crate::model::JobApplication;

/// Exportable record attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobField {
    Id,
    CompanyName,
    JobTitle,
    ApplicationDate,
    Status,
    JobDescription,
    Notes,
}

impl JobField {
    pub const ALL: [Self; 7] = [
        Self::Id,
        Self::CompanyName,
        Self::JobTitle,
        Self::ApplicationDate,
        Self::Status,
        Self::JobDescription,
        Self::Notes,
    ];

    /// Wire name, used as the CSV header.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::CompanyName => "companyName",
            Self::JobTitle => "jobTitle",
            Self::ApplicationDate => "applicationDate",
            Self::Status => "status",
            Self::JobDescription => "jobDescription",
            Self::Notes => "notes",
        }
    }

    /// Unescaped value of this field for one record. Absent optionals are empty.
    #[must_use]
    pub fn value(self, job: &JobApplication) -> String {
        match self {
            Self::Id => job.id.clone(),
            Self::CompanyName => job.company_name.clone(),
            Self::JobTitle => job.job_title.clone(),
            Self::ApplicationDate => job.application_date.format("%Y-%m-%d").to_string(),
            Self::Status => job.status.as_str().to_string(),
            Self::JobDescription => job.job_description.clone().unwrap_or_default(),
            Self::Notes => job.notes.clone().unwrap_or_default(),
        }
    }
}

impl fmt::Display for JobField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for JobField {
    type Err = Error;

    /// Accepts the wire name in any case, with or without `_`/`-` separators
    /// (`companyName`, `company_name`, `company-name`).
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|f| f.name().to_lowercase() == key)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|f| f.name()).collect();
                Error::InvalidArgument(format!(
                    "unknown field '{}' (expected one of: {})",
                    s.trim(),
                    names.join(", ")
                ))
            })
    }
}

/// Parse a comma-separated field list. An empty string yields no fields.
///
/// # Errors
///
/// Returns `InvalidArgument` for an unknown field name.
pub fn parse_fields(list: &str) -> Result<Vec<JobField>> {
    list.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Rows selected for export, in selection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub fields: Vec<JobField>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    /// Render as CSV text, one `\n`-terminated line per row after the header.
    ///
    /// With no fields there is no header and every row is an empty line.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        if !self.fields.is_empty() {
            let header: Vec<&str> = self.fields.iter().map(|f| f.name()).collect();
            out.push_str(&header.join(","));
            out.push('\n');
        }
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|v| csv_escape(v)).collect();
            out.push_str(&cells.join(","));
            out.push('\n');
        }
        out
    }

    /// Write the CSV rendering to `writer`.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the writer fails.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(self.to_csv().as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Project the selected records onto `fields`.
///
/// Rows follow selection order; selected ids with no record in `jobs` are
/// skipped.
#[must_use]
pub fn export_subset(
    jobs: &[JobApplication],
    selection: &Selection,
    fields: &[JobField],
) -> ExportTable {
    let rows = selection
        .ids()
        .iter()
        .filter_map(|id| jobs.iter().find(|j| &j.id == id))
        .map(|job| fields.iter().map(|f| f.value(job)).collect())
        .collect();

    ExportTable {
        fields: fields.to_vec(),
        rows,
    }
}
