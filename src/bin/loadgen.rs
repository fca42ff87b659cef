//! Load generator binary.
//!
//! Fleet mode (the default) runs the configured number of worker loops
//! against the target until terminated, then prints the aggregate counters
//! as JSON. `--probe N` instead issues N sequential requests and prints the
//! average latency.

use std::path::PathBuf;

use clap::Parser;

use connbench::config::{loader, BenchConfig};
use connbench::lifecycle::{signals, Shutdown};
use connbench::loadgen::{LoadGenerator, Probe};
use connbench::observability::logging;

#[derive(Parser)]
#[command(name = "connbench-load")]
#[command(about = "Concurrent HTTP load generator", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the target URL.
    #[arg(short, long)]
    url: Option<String>,

    /// Override the number of concurrent workers.
    #[arg(short, long)]
    workers: Option<usize>,

    /// Per-request timeout in milliseconds (0 disables the timeout).
    #[arg(long)]
    request_timeout_ms: Option<u64>,

    /// Interval between aggregate progress logs, in seconds.
    #[arg(long)]
    report_interval_secs: Option<u64>,

    /// Run N sequential requests on one client and report average latency,
    /// instead of sustained concurrent load.
    #[arg(long, value_name = "N")]
    probe: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => loader::load_config(path)?,
        None => BenchConfig::default(),
    };
    if let Some(url) = args.url {
        config.load.target_url = url;
    }
    if let Some(workers) = args.workers {
        config.load.workers = workers;
    }
    if let Some(ms) = args.request_timeout_ms {
        config.load.request_timeout_ms = if ms == 0 { None } else { Some(ms) };
    }
    if let Some(secs) = args.report_interval_secs {
        config.load.report_interval_secs = secs;
    }

    logging::init(&config.observability.log_level);

    if let Some(requests) = args.probe {
        let probe = Probe::new(&config.load)?;
        tracing::info!(target = %config.load.target_url, requests, "Probe starting");
        let report = probe.run(requests).await;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_signal(shutdown.clone()));

    let generator = LoadGenerator::new(config.load)?;
    let stats = generator.stats();
    generator.run(&shutdown).await?;

    println!("{}", serde_json::to_string_pretty(&stats.snapshot())?);
    Ok(())
}
