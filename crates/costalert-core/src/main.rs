//! CostAlert CLI
//!
//! Prints an alert line for every day whose cost exceeds the threshold.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use costalert::config::LoggingConfig;
use tracing::debug;

/// CostAlert - Monitors costs and alerts on thresholds
#[derive(Parser)]
#[command(name = "costalert")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file path for cost data (default: built-in sample data)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Cost alert threshold (default: 500, or the configured value)
    #[arg(long)]
    threshold: Option<f64>,

    /// Configuration file path
    #[arg(short, long, env = "COSTALERT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output format
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = match costalert::Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.logging, cli.verbose);

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout carries only the report
fn init_logging(logging: &LoggingConfig, verbose: bool) {
    let log_level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(cli: &Cli, config: &costalert::Config) -> anyhow::Result<()> {
    let threshold = cli.threshold.unwrap_or(config.alerting.threshold);
    debug!(threshold, file = ?cli.file, "Starting cost check");

    let output = costalert::runner::run(cli.file.as_deref(), threshold)?;

    match cli.format {
        OutputFormat::Text => {
            for line in &output.lines {
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output.evaluation)?);
        }
    }

    Ok(())
}
