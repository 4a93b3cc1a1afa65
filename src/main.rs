use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use bookgraph::{
    cli::{ReaderSource, Session},
    AppError, Config, Library,
};
use clap::Parser;

/// Interactive book recommendations from a CSV catalogue
#[derive(Parser, Debug)]
#[command(name = "bookgraph", version)]
struct Args {
    /// Catalogue file (overrides BOOKGRAPH_CATALOGUE_PATH)
    #[arg(short, long, value_name = "PATH")]
    catalogue: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    setup_tracing(args.verbose);

    let mut config = Config::from_env()?;
    if let Some(path) = args.catalogue {
        config.catalogue_path = path;
    }

    tracing::debug!(?config, "Configuration loaded");

    let (mut library, report) = match Library::open(&config) {
        Ok(opened) => opened,
        Err(e @ (AppError::EmptyCatalogue | AppError::InputSourceUnavailable { .. })) => {
            println!("{}", e);
            if matches!(e, AppError::InputSourceUnavailable { .. }) {
                println!("{}", AppError::EmptyCatalogue);
            }
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    for diagnostic in &report.diagnostics {
        println!("{}", diagnostic);
    }
    println!(
        "Loaded {} books from {}",
        report.loaded,
        config.catalogue_path.display()
    );
    println!("Book graph built based on shared authors and genres.");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(&mut library, ReaderSource::new(stdin.lock()), stdout.lock()).run()?;

    Ok(ExitCode::SUCCESS)
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("bookgraph=debug")
        } else {
            EnvFilter::new("bookgraph=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
