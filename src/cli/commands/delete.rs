//! Batch delete command implementation.

use crate::cli::SelectArgs;
use crate::client::{batch_delete, JobApi, JobCache};
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;

#[derive(Serialize)]
struct DeleteOutput {
    deleted: Vec<String>,
    failed: Vec<serde_json::Value>,
    count: usize,
}

/// Execute the delete command.
///
/// Every selected ID is attempted; failures are reported together at the end.
///
/// # Errors
///
/// Returns the first per-ID failure (after printing the full report) so the
/// exit code reflects its category, or a selection/backend error.
pub async fn execute<A: JobApi>(api: &A, args: &SelectArgs, json: bool) -> Result<()> {
    let mut cache = JobCache::new();
    let mut selection = super::resolve_selection(api, args, &mut cache).await?;

    if selection.is_empty() {
        if json {
            let output = DeleteOutput {
                deleted: Vec::new(),
                failed: Vec::new(),
                count: 0,
            };
            println!("{}", serde_json::to_string(&output)?);
        } else {
            println!("No matching job applications to delete.");
        }
        return Ok(());
    }

    let report = batch_delete(api, &mut cache, &mut selection).await;

    if json {
        let output = DeleteOutput {
            deleted: report.deleted.iter().map(|j| j.id.clone()).collect(),
            failed: report
                .failures
                .iter()
                .map(|f| {
                    serde_json::json!({
                        "id": f.id,
                        "error": f.error.to_structured_json()["error"],
                    })
                })
                .collect(),
            count: report.deleted.len(),
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        for job in &report.deleted {
            println!(
                "{} Deleted {} @ {} [{}]",
                "✓".green(),
                job.job_title,
                job.company_name,
                job.id
            );
        }
        for failure in &report.failures {
            println!("{} {}: {}", "✗".red(), failure.id, failure.error);
        }
        println!();
        println!(
            "Deleted {} of {} selected job applications.",
            report.deleted.len(),
            report.deleted.len() + report.failures.len()
        );
    }

    match report.failures.into_iter().next() {
        Some(first) => Err(first.error),
        None => Ok(()),
    }
}
