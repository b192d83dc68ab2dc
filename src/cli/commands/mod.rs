//! Command implementations.

pub mod completions;
pub mod delete;
pub mod export;
pub mod job;
pub mod list;
pub mod serve;
pub mod version;

use crate::cli::SelectArgs;
use crate::client::{JobApi, JobCache, Selection};
use crate::error::{Error, Result};
use crate::model::{JobApplication, JobStatus};
use colored::{ColoredString, Colorize};
use std::future::Future;

/// Run an async command body on a fresh runtime.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
pub fn block_on<F: Future>(fut: F) -> Result<F::Output> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;
    Ok(rt.block_on(fut))
}

/// Turn positional IDs or `--all-matching` filters into a selection.
///
/// With `--all-matching` the cache is refreshed and the selection is the
/// filtered view, newest first. Explicit IDs keep their given order.
///
/// # Errors
///
/// Returns `InvalidArgument` when nothing is selected or when filter flags
/// are given without `--all-matching`, or the filter/backend error.
pub(crate) async fn resolve_selection<A: JobApi>(
    api: &A,
    args: &SelectArgs,
    cache: &mut JobCache,
) -> Result<Selection> {
    let mut selection = Selection::new();

    if args.all_matching {
        let spec = list::filter_spec(&args.filter)?;
        cache.refresh(api).await?;
        let view = spec.apply(cache.jobs());
        selection.select_view(&view);
    } else if args.filter.is_set() {
        return Err(Error::InvalidArgument(
            "filter flags only apply with --all-matching".to_string(),
        ));
    } else if args.ids.is_empty() {
        return Err(Error::InvalidArgument(
            "no jobs selected (pass job IDs or --all-matching)".to_string(),
        ));
    } else {
        selection.select_all(args.ids.iter().map(String::as_str));
    }

    Ok(selection)
}

fn status_label(status: JobStatus) -> ColoredString {
    match status {
        JobStatus::Applied => status.as_str().blue(),
        JobStatus::Interviewing => status.as_str().yellow(),
        JobStatus::Rejected => status.as_str().red(),
        JobStatus::Offered => status.as_str().green().bold(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        s.to_string()
    }
}

/// One line per job: date, status, title @ company, id.
pub(crate) fn print_job_table(jobs: &[&JobApplication]) {
    println!("Job applications ({} found):", jobs.len());
    println!();
    for job in jobs {
        println!(
            "{}  {:<12} {} @ {} {}",
            job.application_date.format("%Y-%m-%d"),
            status_label(job.status),
            truncate(&job.job_title, 40),
            truncate(&job.company_name, 30).bold(),
            format!("[{}]", job.id).dimmed(),
        );
    }
}

/// Full detail view of one job.
pub(crate) fn print_job(job: &JobApplication) {
    println!("{} @ {}", job.job_title.bold(), job.company_name.bold());
    println!("  ID:      {}", job.id);
    println!("  Applied: {}", job.application_date.format("%Y-%m-%d"));
    println!("  Status:  {}", status_label(job.status));
    if let Some(ref desc) = job.job_description {
        println!("  Description:");
        for line in desc.lines() {
            println!("    {line}");
        }
    }
    if let Some(ref notes) = job.notes {
        println!("  Notes:");
        for line in notes.lines() {
            println!("    {line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer title", 10), "a much ...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }
}
