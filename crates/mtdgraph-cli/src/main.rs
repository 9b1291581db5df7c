//! mtdgraph: reports over the `.mtd` metadata of Sungero development
//! repositories.

mod config;
mod output;
mod walk;

use clap::{Parser, Subcommand};
use config::{Config, ConfigError};
use mtdgraph::{
    build::{Graph, Loader},
    report::{self, ReportOptions},
};
use output::OutputError;
use std::{path::PathBuf, process::ExitCode};
use thiserror::Error as ThisError;
use walk::{WalkError, WalkStats, Walker};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "mtdgraph", version)]
#[command(about = "Metadata graph reports for Sungero development repositories")]
struct Cli {
    /// Config file
    #[arg(short, long, value_name = "PATH", default_value = "mtdgraph.toml")]
    config: PathBuf,

    /// Overrides `git_root` from the config
    #[arg(long, env = "MTDGRAPH_GIT_ROOT", value_name = "PATH")]
    git_root: Option<PathBuf>,

    /// Fail when any record could not be loaded
    #[arg(long)]
    strict: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print entity counts and batch health
    Summary,

    /// Write every report sheet as JSON
    Report {
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,
    },

    /// Write package descriptors (XML, or JSON for a `.json` file)
    Packages {
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,
    },
}

///
/// CliError
///

#[derive(Debug, ThisError)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error(transparent)]
    Graph(#[from] mtdgraph::Error),

    #[error(transparent)]
    Output(#[from] OutputError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    let graph = load_graph(&config)?;

    if cli.strict {
        graph.check()?;
    }

    match cli.command {
        Command::Summary => print!("{}", output::summary(&graph)),
        Command::Report { out } => {
            let options = ReportOptions {
                locales: config.locales.clone(),
            };
            output::write_report(&out, &report::project(&graph, &options))?;
        }
        Command::Packages { out } => {
            output::write_packages(&out, &report::package::descriptors(&graph))?;
        }
    }

    Ok(())
}

// load_config
// a missing config file is fine when the git root comes from the command line
fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = if cli.git_root.is_some() && !cli.config.exists() {
        Config::default()
    } else {
        Config::load(&cli.config)?
    };

    if let Some(git_root) = &cli.git_root {
        config.git_root = Some(git_root.clone());
    }

    Ok(config)
}

fn load_graph(config: &Config) -> Result<Graph, CliError> {
    let mut loader = Loader::new();
    let mut total = WalkStats::default();

    for (root, category) in config.roots()? {
        let stats = Walker::new(&mut loader, &config.default_locale).walk(&root, category)?;
        total.merge(stats);
    }

    tracing::info!(
        modules = total.modules,
        records = total.records,
        archived = total.archived,
        skipped = total.skipped,
        "walk finished"
    );

    Ok(loader.finish())
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("mtdgraph=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}
