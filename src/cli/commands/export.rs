//! CSV export command implementation.

use crate::cli::ExportArgs;
use crate::client::{export_subset, parse_fields, JobApi, JobCache};
use crate::error::Result;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter};
use tracing::info;

#[derive(Serialize)]
struct ExportOutput {
    path: String,
    count: usize,
}

/// Execute the export command.
///
/// Rows follow selection order. Selected IDs with no record are skipped.
///
/// # Errors
///
/// Returns `InvalidArgument` for unknown field names, an I/O error if the
/// output cannot be written, or a selection/backend error.
pub async fn execute<A: JobApi>(api: &A, args: &ExportArgs, json: bool) -> Result<()> {
    let fields = parse_fields(&args.fields)?;

    let mut cache = JobCache::new();
    let selection = super::resolve_selection(api, &args.select, &mut cache).await?;
    if !args.select.all_matching {
        cache.refresh(api).await?;
    }

    let table = export_subset(cache.jobs(), &selection, &fields);

    match &args.output {
        Some(path) => {
            table.write_csv(BufWriter::new(File::create(path)?))?;
            info!(path = %path.display(), rows = table.len(), "Exported job applications");
            if json {
                let output = ExportOutput {
                    path: path.display().to_string(),
                    count: table.len(),
                };
                println!("{}", serde_json::to_string(&output)?);
            } else {
                println!("Exported {} job applications to {}", table.len(), path.display());
            }
        }
        None => table.write_csv(io::stdout().lock())?,
    }

    Ok(())
}
