use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use garde::Validate;
use std::path::PathBuf;
use std::process::ExitCode;

use stac_checker::checker::checks::PathDeriver;
use stac_checker::checker::validate::load_catalog;
use stac_checker::{CheckRunner, Error, NodeKind};

#[derive(Parser)]
#[command(name = "stac-checker", about = "Check STAC catalog nodes", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run checks over every node under a catalog root
    Check(CheckArgs),
    /// Print the location a node id must be stored at
    ExpectedPath {
        id: String,
        #[arg(long, value_enum, default_value_t = Kind::Collection)]
        kind: Kind,
    },
    /// List the registered checks
    ListChecks,
}

#[derive(Args, Validate)]
struct CheckArgs {
    #[garde(skip)]
    root: PathBuf,
    /// Only run the named checks (repeatable)
    #[arg(long = "check")]
    #[garde(inner(length(min = 1)))]
    checks: Vec<String>,
    /// Worker threads (defaults to one per core)
    #[arg(short, long)]
    #[garde(range(min = 1, max = 512))]
    jobs: Option<usize>,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    #[garde(skip)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Catalog,
    Collection,
}

impl From<Kind> for NodeKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Catalog => NodeKind::Catalog,
            Kind::Collection => NodeKind::Collection,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Check(args) => check(args),
        Command::ExpectedPath { id, kind } => {
            match PathDeriver::default().expected_path(&id, kind.into()) {
                Ok(expected) => {
                    println!("{}", expected.path.display());
                    Ok(ExitCode::SUCCESS)
                }
                Err(rejection) => {
                    eprintln!("{id}: {rejection}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::ListChecks => {
            for name in CheckRunner::default().names() {
                println!("{name}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    args.validate().map_err(Error::from)?;

    let runner = CheckRunner::select(args.checks.as_slice())?;
    let nodes = load_catalog(&args.root)
        .with_context(|| format!("loading catalog from {}", args.root.display()))?;

    let issues = match args.jobs {
        Some(jobs) => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .map_err(Error::from)?
            .install(|| runner.run_all(&nodes)),
        None => runner.run_all(&nodes),
    };

    match args.format {
        Format::Text => {
            for issue in &issues {
                println!("{issue}");
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&issues)?),
    }

    Ok(if issues.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
