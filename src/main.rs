//! Job Tracker CLI entry point.

use clap::Parser;
use jt::cli::commands;
use jt::cli::{Backend, Cli, Commands, OutputFormat};
use jt::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.format == OutputFormat::Csv {
        jt::CSV_OUTPUT.store(true, std::sync::atomic::Ordering::Relaxed);
    }
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Set up tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    // Resolve effective JSON mode: --json OR --format json OR non-TTY stdout
    let json = cli.json
        || cli.format == OutputFormat::Json
        || !std::io::IsTerminal::is_terminal(&std::io::stdout());

    match run(&cli, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,rusqlite=info,hyper=info,reqwest=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli, json: bool) -> Result<(), Error> {
    match &cli.command {
        Commands::Version => commands::version::execute(json),
        Commands::Completions { shell } => commands::completions::execute(shell),
        Commands::Serve { listen } => commands::serve::execute(listen.as_deref(), cli.db.as_ref()),
        command => {
            let backend = Backend::from_cli(cli)?;
            commands::block_on(run_job_command(&backend, command, json))?
        }
    }
}

async fn run_job_command(backend: &Backend, command: &Commands, json: bool) -> Result<(), Error> {
    match command {
        Commands::Add(args) => commands::job::add(backend, args, json).await,
        Commands::Show { id } => commands::job::show(backend, id, json).await,
        Commands::Update(args) => commands::job::update(backend, args, json).await,
        Commands::List(args) => commands::list::execute(backend, args, json).await,
        Commands::Delete(args) => commands::delete::execute(backend, args, json).await,
        Commands::Export(args) => commands::export::execute(backend, args, json).await,
        Commands::Version | Commands::Completions { .. } | Commands::Serve { .. } => Ok(()),
    }
}
