//! Single-record commands: add, show, update.

use crate::cli::{AddArgs, UpdateArgs};
use crate::client::JobApi;
use crate::error::{Error, Result};
use crate::model::{JobApplication, JobPayload};
use chrono::Local;
use tracing::debug;

fn print_result(verb: &str, job: &JobApplication, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(job)?);
    } else {
        if !verb.is_empty() {
            println!("{verb} job application {}", job.id);
            println!();
        }
        super::print_job(job);
    }
    Ok(())
}

/// Execute the add command.
///
/// Field checks happen in the service; the CLI only fills in today's date.
///
/// # Errors
///
/// Returns a validation error for bad fields, or the backend error.
pub async fn add<A: JobApi>(api: &A, args: &AddArgs, json: bool) -> Result<()> {
    let payload = JobPayload {
        company_name: args.company.clone(),
        job_title: args.title.clone(),
        application_date: Some(
            args.date
                .clone()
                .unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string()),
        ),
        status: Some(args.status.clone()),
        job_description: args.description.clone(),
        notes: args.notes.clone(),
    };

    let job = api.create_job(&payload).await?;
    print_result("Created", &job, json)
}

/// Execute the show command.
///
/// # Errors
///
/// Returns `NotFound` if the ID is unknown, or the backend error.
pub async fn show<A: JobApi>(api: &A, id: &str, json: bool) -> Result<()> {
    let job = api.get_job(id).await?;
    print_result("", &job, json)
}

/// Execute the update command.
///
/// # Errors
///
/// Returns `InvalidArgument` when no field flag is given, a validation error
/// for bad values, `NotFound` for an unknown ID, or the backend error.
pub async fn update<A: JobApi>(api: &A, args: &UpdateArgs, json: bool) -> Result<()> {
    let payload = JobPayload {
        company_name: args.company.clone(),
        job_title: args.title.clone(),
        application_date: args.date.clone(),
        status: args.status.clone(),
        job_description: args.description.clone(),
        notes: args.notes.clone(),
    };

    if payload == JobPayload::default() {
        return Err(Error::InvalidArgument(
            "nothing to update (pass at least one of --company, --title, --date, --status, --description, --notes)"
                .to_string(),
        ));
    }

    debug!(id = %args.id, "Sending job update");
    let job = api.update_job(&args.id, &payload).await?;
    print_result("Updated", &job, json)
}
