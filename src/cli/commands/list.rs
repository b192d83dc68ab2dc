//! List command implementation.

use crate::cli::FilterArgs;
use crate::client::{DateFilter, DatePreset, DateRange, FilterSpec, JobApi, JobCache};
use crate::error::Result;
use crate::model::JobApplication;
use crate::validate::{parse_application_date, parse_status};
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Output for list command.
#[derive(Serialize)]
struct JobListOutput<'a> {
    jobs: &'a [&'a JobApplication],
    count: usize,
}

/// Build a filter specification from CLI flags.
///
/// `--from`/`--to` form a custom range; a missing end defaults to the epoch
/// or today.
///
/// # Errors
///
/// Returns a validation error for an unknown status or a bad date, and
/// `InvalidArgument` for an unknown range preset.
pub fn filter_spec(args: &FilterArgs) -> Result<FilterSpec> {
    filter_spec_at(args, Local::now().date_naive())
}

fn filter_spec_at(args: &FilterArgs, today: NaiveDate) -> Result<FilterSpec> {
    let status = args.status.as_deref().map(parse_status).transpose()?;

    let date = if args.from.is_some() || args.to.is_some() {
        let from = args.from.as_deref().map(parse_application_date).transpose()?;
        let to = args.to.as_deref().map(parse_application_date).transpose()?;
        DateFilter::Custom(DateRange::open(from, to, today))
    } else {
        let preset = match args.range.as_deref() {
            Some(range) => range.parse::<DatePreset>()?,
            None => DatePreset::All,
        };
        DateFilter::Preset(preset)
    };

    Ok(FilterSpec {
        title_contains: args.title.clone().unwrap_or_default(),
        company_contains: args.company.clone().unwrap_or_default(),
        status,
        date,
    })
}

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the filter flags are invalid or the backend fails.
pub async fn execute<A: JobApi>(api: &A, args: &FilterArgs, json: bool) -> Result<()> {
    let spec = filter_spec(args)?;
    let mut cache = JobCache::new();
    cache.refresh(api).await?;
    let jobs = spec.apply(cache.jobs());

    if crate::is_csv() {
        println!("id,companyName,jobTitle,applicationDate,status");
        for job in &jobs {
            println!(
                "{},{},{},{},{}",
                job.id,
                crate::csv_escape(&job.company_name),
                crate::csv_escape(&job.job_title),
                job.application_date.format("%Y-%m-%d"),
                job.status
            );
        }
    } else if json {
        let output = JobListOutput {
            jobs: &jobs,
            count: jobs.len(),
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if jobs.is_empty() {
        println!("No job applications found.");
    } else {
        super::print_job_table(&jobs);
    }

    Ok(())
}
