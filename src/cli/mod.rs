//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for list/query commands.
#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table (default)
    #[default]
    Table,
    /// JSON (same as --json)
    Json,
    /// Comma-separated values
    Csv,
}

pub mod backend;
pub mod commands;

pub use backend::Backend;

/// Job Tracker - record and query job applications
#[derive(Parser, Debug)]
#[command(name = "jt", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (default: ~/.jobtracker/data/jobs.db)
    #[arg(long, global = true, env = "JT_DB")]
    pub db: Option<PathBuf>,

    /// Job API server URL (default: http://localhost:5000)
    #[arg(long, global = true, env = "JT_URL")]
    pub url: Option<String>,

    /// Use the local database directly instead of a running server
    #[arg(long, global = true)]
    pub local: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format (table, json, csv)
    #[arg(long, value_enum, global = true, default_value_t)]
    pub format: OutputFormat,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the job API server
    Serve {
        /// Address to listen on (default: 0.0.0.0:5000)
        #[arg(long, env = "JT_LISTEN")]
        listen: Option<String>,
    },

    /// Record a new job application
    Add(AddArgs),

    /// List job applications, newest first
    List(FilterArgs),

    /// Show one job application
    Show {
        /// Job ID
        id: String,
    },

    /// Update fields of a job application
    Update(UpdateArgs),

    /// Delete job applications
    Delete(SelectArgs),

    /// Export selected job applications as CSV
    Export(ExportArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print version information
    Version,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Company name
    #[arg(long)]
    pub company: Option<String>,

    /// Job title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Application date, YYYY-MM-DD (default: today)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Status (Applied, Interviewing, Rejected, Offered)
    #[arg(short, long, default_value = "Applied")]
    pub status: String,

    /// Job description
    #[arg(long)]
    pub description: Option<String>,

    /// Free-form notes
    #[arg(short, long)]
    pub notes: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Job ID
    pub id: String,

    /// New company name
    #[arg(long)]
    pub company: Option<String>,

    /// New job title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New application date, YYYY-MM-DD
    #[arg(short, long)]
    pub date: Option<String>,

    /// New status
    #[arg(short, long)]
    pub status: Option<String>,

    /// New job description
    #[arg(long)]
    pub description: Option<String>,

    /// New notes
    #[arg(short, long)]
    pub notes: Option<String>,
}

/// Filter flags shared by list, delete and export.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Job title contains (case-insensitive)
    #[arg(long)]
    pub title: Option<String>,

    /// Company name contains (case-insensitive)
    #[arg(long)]
    pub company: Option<String>,

    /// Exact status
    #[arg(long)]
    pub status: Option<String>,

    /// Date preset (today, yesterday, last7, last14, last-month, all)
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub range: Option<String>,

    /// Applied on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Applied on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

impl FilterArgs {
    /// True when any filter flag was given.
    #[must_use]
    pub fn is_set(&self) -> bool {
        [&self.title, &self.company, &self.status, &self.range, &self.from, &self.to]
            .iter()
            .any(|f| f.is_some())
    }
}

/// Which records a batch command acts on.
#[derive(Args, Debug)]
pub struct SelectArgs {
    /// Job IDs, in the order to process them
    pub ids: Vec<String>,

    /// Select every record matching the filter flags (filters require this)
    #[arg(long, conflicts_with = "ids")]
    pub all_matching: bool,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Comma-separated fields, in column order
    #[arg(long, default_value = "companyName,jobTitle,applicationDate,status")]
    pub fields: String,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub select: SelectArgs,
}
