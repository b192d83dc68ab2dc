//! Version command implementation.

use crate::error::Result;
use serde::Serialize;

#[derive(Serialize)]
struct VersionOutput<'a> {
    name: &'a str,
    version: &'a str,
    build: &'a str,
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");
    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    if json {
        let output = VersionOutput {
            name,
            version,
            build,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("jt ({name}) {version} ({build})");
    Ok(())
}
