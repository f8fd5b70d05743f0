// Statwatch
// Polls a server statistics endpoint and prints a warning line whenever a
// resource metric crosses its threshold.

use anyhow::{Context, Result};
use clap::Parser;
use statwatch::config::{
    PollerConfig, DEFAULT_STATS_URL, DEFAULT_TIMEOUT_SECS, POLL_INTERVAL_ENV,
};
use statwatch::{Evaluator, HttpStatsSource, Poller, Reporter};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "statwatch")]
#[command(about = "Watch a server statistics endpoint and warn on high resource usage", long_about = None)]
struct Cli {
    /// Statistics endpoint URL
    #[arg(long, env = "STATS_URL", default_value = DEFAULT_STATS_URL)]
    url: String,

    /// Milliseconds between polls; invalid values fall back to 1000
    #[arg(long = "interval-ms", env = POLL_INTERVAL_ENV)]
    interval_ms: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout is reserved for warnings
    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = PollerConfig::from_parts(cli.url, cli.interval_ms.as_deref(), cli.timeout_secs);

    let source = HttpStatsSource::new(config.url.clone(), config.timeout)
        .context("Failed to set up statistics client")?;

    let stop = statwatch::shutdown::listen();
    let mut poller = Poller::new(config, source, Evaluator::default(), Reporter::stdout());

    match poller.run(stop).await {
        Ok(cycles) => {
            info!("Exiting after {} poll cycles", cycles);
            Ok(())
        }
        Err(e) => {
            error!("Failed to write to stdout: {}", e);
            Err(e).context("Console output failed")
        }
    }
}
