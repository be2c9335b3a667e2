use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use plagscan::{PlagscanConfig, Scanner};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Log filter, e.g. `plagscan=debug`. Falls back to `RUST_LOG`, then `warn`.
const LOG_ENV: &str = "PLAGSCAN_LOG";

/// Plagscan: flag documents whose normalized text overlaps a base document.
#[derive(Debug, Parser)]
#[command(name = "plagscan", version, about)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Characters per hashed window (overrides config and environment)
    #[arg(long, global = true)]
    window_size: Option<usize>,

    /// Similarity ratio at or above which a pair is flagged (0.0 to 1.0)
    #[arg(long, global = true)]
    threshold: Option<f64>,

    /// Compare scan candidates on all cores
    #[arg(long, global = true)]
    parallel: bool,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two documents
    Compare { left: PathBuf, right: PathBuf },

    /// Compare a base document against one or more candidates
    Scan {
        base: PathBuf,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the normalized text of a document
    Normalize { file: PathBuf },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = load_config(&cli)?;
    debug!(?config, "config_loaded");
    let scanner = Scanner::new(&config).context("invalid configuration")?;

    match &cli.command {
        Commands::Compare { left, right } => {
            let report = match scanner.compare_paths(left, right) {
                Ok(report) => report,
                Err(err) => {
                    eprintln!("There was an issue with one of the files: {err}");
                    return Ok(ExitCode::FAILURE);
                }
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{report}");
            }
        }

        Commands::Scan { base, files } => {
            let report = match scanner.scan_paths(base, files) {
                Ok(report) => report,
                Err(err) => {
                    eprintln!("Error processing the base file: {err}");
                    return Ok(ExitCode::FAILURE);
                }
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{report}");
            }
        }

        Commands::Normalize { file } => {
            let doc = scanner
                .prepare_file(file)
                .with_context(|| format!("failed to process {}", file.display()))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&doc.document.canonical)?);
            } else {
                println!("{}", doc.document.canonical.canonical);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// File (or defaults), then environment, then command-line flags.
fn load_config(cli: &Cli) -> Result<PlagscanConfig> {
    let mut config = match &cli.config {
        Some(path) => PlagscanConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => PlagscanConfig::default(),
    };
    config
        .apply_env_overrides()
        .context("invalid environment override")?;

    if let Some(window_size) = cli.window_size {
        config.matcher.window_size = window_size;
    }
    if let Some(threshold) = cli.threshold {
        config.matcher.threshold = threshold;
    }
    if cli.parallel {
        config.scan.parallel = true;
    }
    config.validate().context("invalid command-line override")?;
    Ok(config)
}
