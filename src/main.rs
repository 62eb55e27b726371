//! tek-stats - key export statistics
//!
//! Fetches every published key batch from a key server and prints aggregate
//! statistics. Exits non-zero on the first fatal error.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tek_stats::{Config, HttpTransport, Pipeline, RunSummary};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// tek-stats - exposure key export statistics
#[derive(Parser, Debug)]
#[command(name = "tek-stats")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the key server (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long)]
    timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the summary as JSON on stdout
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn load_config(&self) -> tek_stats::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(secs) = self.timeout {
            config.request_timeout = Duration::from_secs(secs);
        }
        config.validate()?;
        Ok(config)
    }
}

async fn run(cli: &Cli) -> tek_stats::Result<(RunSummary, Config)> {
    let config = cli.load_config()?;
    let transport = HttpTransport::new(&config)?;
    let pipeline = Pipeline::new(transport, config.clone());
    let summary = pipeline.run().await?;
    Ok((summary, config))
}

/// Final summary lines; printed regardless of the log filter
fn summary_lines(summary: &RunSummary, config: &Config) -> Vec<String> {
    let window = summary
        .window()
        .map_or_else(|| "unknown".to_string(), |w| w.to_string());

    let mut lines = vec![
        format!("total number of keys: {}", summary.total_keys),
        format!(
            "unique number of reports assuming {} TEK per report: {}",
            config.keys_per_report,
            summary.estimated_reports(config.keys_per_report)
        ),
        format!("total time window: {}", window),
    ];
    if summary.batches_skipped > 0 {
        lines.push(format!(
            "batches without {}: {}",
            config.export_member, summary.batches_skipped
        ));
    }
    lines
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli).await {
        Ok((summary, config)) => {
            if cli.json {
                match serde_json::to_string_pretty(&summary) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!(error = %e, "could not serialize summary");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                for line in summary_lines(&summary, &config) {
                    println!("{}", line);
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(code = e.error_code(), "{}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}
