//! Filter predicates and ordering over an in-memory record set.
//!
//! All active predicates must hold (AND). Text predicates are
//! case-insensitive substring matches where an empty needle matches
//! everything; status is exact equality; dates are inclusive at both ends.
//! Date presets are resolved against "today" on every evaluation, never
//! stored as concrete dates.
//!
//! Results are sorted by application date, newest first. The sort is stable,
//! so records sharing a date keep their input order.

use std::str::FromStr;

use chrono::{Local, Months, NaiveDate};

use crate::error::{Error, Result};
use crate::model::{JobApplication, JobStatus};

/// Inclusive calendar-date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Lower bound used when a range has no explicit start.
    #[must_use]
    pub fn epoch() -> NaiveDate {
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
    }

    /// Range with optional ends: a missing start means the epoch, a missing
    /// end means today.
    #[must_use]
    pub fn open(start: Option<NaiveDate>, end: Option<NaiveDate>, today: NaiveDate) -> Self {
        Self {
            start: start.unwrap_or_else(Self::epoch),
            end: end.unwrap_or(today),
        }
    }

    /// Inclusive membership test.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Named date ranges anchored to the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePreset {
    Today,
    Yesterday,
    Last7Days,
    Last14Days,
    LastMonth,
    #[default]
    All,
}

impl DatePreset {
    /// Concrete range for this preset, or `None` for no constraint.
    #[must_use]
    pub fn resolve(self, today: NaiveDate) -> Option<DateRange> {
        let days_back = |n: u64| today.checked_sub_days(chrono::Days::new(n)).unwrap_or(DateRange::epoch());

        match self {
            Self::Today => Some(DateRange::new(today, today)),
            Self::Yesterday => {
                let yesterday = days_back(1);
                Some(DateRange::new(yesterday, yesterday))
            }
            Self::Last7Days => Some(DateRange::new(days_back(7), today)),
            Self::Last14Days => Some(DateRange::new(days_back(14), today)),
            Self::LastMonth => {
                let start = today
                    .checked_sub_months(Months::new(1))
                    .unwrap_or(DateRange::epoch());
                Some(DateRange::new(start, today))
            }
            Self::All => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::Last7Days => "last7",
            Self::Last14Days => "last14",
            Self::LastMonth => "last-month",
            Self::All => "all",
        }
    }
}

impl FromStr for DatePreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "today" => Ok(Self::Today),
            "yesterday" => Ok(Self::Yesterday),
            "last7" | "last7days" | "7d" => Ok(Self::Last7Days),
            "last14" | "last14days" | "14d" => Ok(Self::Last14Days),
            "lastmonth" | "month" => Ok(Self::LastMonth),
            "all" => Ok(Self::All),
            _ => Err(Error::InvalidArgument(format!(
                "unknown date range '{s}' (expected today, yesterday, last7, last14, last-month, all)"
            ))),
        }
    }
}

/// Date predicate: a preset resolved at evaluation time, or a fixed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    Preset(DatePreset),
    Custom(DateRange),
}

impl Default for DateFilter {
    fn default() -> Self {
        Self::Preset(DatePreset::All)
    }
}

impl DateFilter {
    #[must_use]
    pub fn resolve(&self, today: NaiveDate) -> Option<DateRange> {
        match self {
            Self::Preset(preset) => preset.resolve(today),
            Self::Custom(range) => Some(*range),
        }
    }
}

/// Combination of text, status and date predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub title_contains: String,
    pub company_contains: String,
    pub status: Option<JobStatus>,
    pub date: DateFilter,
}

impl FilterSpec {
    /// Filter and sort against today's local date.
    #[must_use]
    pub fn apply<'a>(&self, jobs: &'a [JobApplication]) -> Vec<&'a JobApplication> {
        self.apply_at(jobs, Local::now().date_naive())
    }

    /// Filter and sort with an explicit "today" anchor.
    #[must_use]
    pub fn apply_at<'a>(&self, jobs: &'a [JobApplication], today: NaiveDate) -> Vec<&'a JobApplication> {
        let range = self.date.resolve(today);
        let title = self.title_contains.to_lowercase();
        let company = self.company_contains.to_lowercase();

        let mut matched: Vec<&JobApplication> = jobs
            .iter()
            .filter(|job| contains_ci(&job.job_title, &title))
            .filter(|job| contains_ci(&job.company_name, &company))
            .filter(|job| self.status.is_none_or(|s| job.status == s))
            .filter(|job| range.is_none_or(|r| r.contains(job.application_date)))
            .collect();

        // slice::sort_by is stable
        matched.sort_by(|a, b| b.application_date.cmp(&a.application_date));
        matched
    }
}

/// Case-insensitive containment; `needle` must already be lowercase.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn job(id: &str, company: &str, title: &str, on: NaiveDate, status: JobStatus) -> JobApplication {
        JobApplication {
            id: id.to_string(),
            company_name: company.to_string(),
            job_title: title.to_string(),
            application_date: on,
            status,
            job_description: None,
            notes: None,
        }
    }

    fn abc() -> Vec<JobApplication> {
        vec![
            job("a", "Acme", "Backend Engineer", date(2024, 1, 1), JobStatus::Applied),
            job("b", "Globex", "Frontend Engineer", date(2024, 1, 10), JobStatus::Offered),
            job("c", "Initech", "Data Analyst", date(2024, 2, 1), JobStatus::Rejected),
        ]
    }

    fn ids(jobs: &[&JobApplication]) -> Vec<String> {
        jobs.iter().map(|j| j.id.clone()).collect()
    }

    #[test]
    fn test_january_range_scenario() {
        let jobs = abc();
        let spec = FilterSpec {
            date: DateFilter::Custom(DateRange::new(date(2024, 1, 1), date(2024, 1, 31))),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&spec.apply_at(&jobs, date(2024, 3, 1))), vec!["b", "a"]);
    }

    #[test]
    fn test_no_predicates_sorts_descending() {
        let jobs = abc();
        let result = FilterSpec::default().apply_at(&jobs, date(2024, 3, 1));
        assert_eq!(ids(&result), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_text_match_is_case_insensitive_substring() {
        let jobs = abc();
        let spec = FilterSpec {
            title_contains: "ENGINEER".to_string(),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&spec.apply_at(&jobs, date(2024, 3, 1))), vec!["b", "a"]);

        let spec = FilterSpec {
            company_contains: "tech".to_string(),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&spec.apply_at(&jobs, date(2024, 3, 1))), vec!["c"]);
    }

    #[test]
    fn test_predicates_intersect() {
        let jobs = abc();
        let today = date(2024, 3, 1);
        let title_only = FilterSpec {
            title_contains: "engineer".to_string(),
            ..FilterSpec::default()
        };
        let status_only = FilterSpec {
            status: Some(JobStatus::Offered),
            ..FilterSpec::default()
        };
        let both = FilterSpec {
            title_contains: "engineer".to_string(),
            status: Some(JobStatus::Offered),
            ..FilterSpec::default()
        };

        let a = ids(&title_only.apply_at(&jobs, today));
        let b = ids(&status_only.apply_at(&jobs, today));
        let expected: Vec<String> = a.into_iter().filter(|id| b.contains(id)).collect();
        assert_eq!(ids(&both.apply_at(&jobs, today)), expected);
        assert_eq!(expected, vec!["b"]);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let jobs = abc();
        let spec = FilterSpec {
            date: DateFilter::Custom(DateRange::new(date(2024, 1, 1), date(2024, 1, 10))),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&spec.apply_at(&jobs, date(2024, 3, 1))), vec!["b", "a"]);

        let inverted = FilterSpec {
            date: DateFilter::Custom(DateRange::new(date(2024, 2, 1), date(2024, 1, 1))),
            ..FilterSpec::default()
        };
        assert!(inverted.apply_at(&jobs, date(2024, 3, 1)).is_empty());
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let same_day = date(2024, 5, 5);
        let jobs = vec![
            job("first", "A", "T", same_day, JobStatus::Applied),
            job("older", "B", "T", date(2024, 5, 1), JobStatus::Applied),
            job("second", "C", "T", same_day, JobStatus::Applied),
            job("third", "D", "T", same_day, JobStatus::Applied),
        ];
        let result = FilterSpec::default().apply_at(&jobs, same_day);
        assert_eq!(ids(&result), vec!["first", "second", "third", "older"]);
    }

    #[test]
    fn test_presets_resolve_against_today() {
        let today = date(2024, 3, 15);
        assert_eq!(
            DatePreset::Today.resolve(today),
            Some(DateRange::new(today, today))
        );
        assert_eq!(
            DatePreset::Yesterday.resolve(today),
            Some(DateRange::new(date(2024, 3, 14), date(2024, 3, 14)))
        );
        assert_eq!(
            DatePreset::Last7Days.resolve(today),
            Some(DateRange::new(date(2024, 3, 8), today))
        );
        assert_eq!(
            DatePreset::Last14Days.resolve(today),
            Some(DateRange::new(date(2024, 3, 1), today))
        );
        assert_eq!(
            DatePreset::LastMonth.resolve(today),
            Some(DateRange::new(date(2024, 2, 15), today))
        );
        assert_eq!(DatePreset::All.resolve(today), None);
    }

    #[test]
    fn test_preset_is_recomputed_per_evaluation() {
        let jobs = abc();
        let spec = FilterSpec {
            date: DateFilter::Preset(DatePreset::Today),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&spec.apply_at(&jobs, date(2024, 1, 10))), vec!["b"]);
        assert_eq!(ids(&spec.apply_at(&jobs, date(2024, 2, 1))), vec!["c"]);
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!("today".parse::<DatePreset>().unwrap(), DatePreset::Today);
        assert_eq!("Last 7 Days".parse::<DatePreset>().unwrap(), DatePreset::Last7Days);
        assert_eq!("last_14_days".parse::<DatePreset>().unwrap(), DatePreset::Last14Days);
        assert_eq!("last-month".parse::<DatePreset>().unwrap(), DatePreset::LastMonth);
        assert!("fortnight".parse::<DatePreset>().is_err());
    }

    #[test]
    fn test_open_range_defaults() {
        let today = date(2024, 3, 15);
        let range = DateRange::open(None, None, today);
        assert_eq!(range, DateRange::new(DateRange::epoch(), today));
        assert!(range.contains(date(1999, 12, 31)));
    }
}
