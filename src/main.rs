//! Fixed-response server binary.
//!
//! Binds the configured address and answers every request with the same
//! response until terminated. The connection-lifecycle knobs this binary
//! exposes (`--close-policy`, `--keep-alive-timeout-ms`) are the variables a
//! benchmark run changes between measurements.

use std::path::PathBuf;

use clap::Parser;

use connbench::config::{loader, BenchConfig, ClosePolicy};
use connbench::lifecycle::{signals, Shutdown};
use connbench::net::listener::Listener;
use connbench::observability::logging;
use connbench::server::FixedResponseServer;

#[derive(Parser)]
#[command(name = "connbench-server")]
#[command(about = "Fixed-response HTTP server for connection-reuse benchmarking", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(long)]
    bind_address: Option<String>,

    /// Override the close policy (close or keep-alive).
    #[arg(long)]
    close_policy: Option<String>,

    /// Override the idle keep-alive timeout in milliseconds.
    #[arg(long)]
    keep_alive_timeout_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => loader::load_config(path)?,
        None => BenchConfig::default(),
    };
    if let Some(bind_address) = args.bind_address {
        config.server.bind_address = bind_address;
    }
    if let Some(policy) = args.close_policy {
        config.server.connection.close_policy = policy.parse::<ClosePolicy>()?;
    }
    if let Some(ms) = args.keep_alive_timeout_ms {
        config.server.connection.keep_alive_timeout_ms = ms;
    }

    logging::init(&config.observability.log_level);

    tracing::info!("connbench-server v0.1.0 starting");
    tracing::info!(
        bind_address = %config.server.bind_address,
        close_policy = %config.server.connection.close_policy,
        keep_alive_timeout_ms = config.server.connection.keep_alive_timeout_ms,
        header_timeout_ms = config.server.connection.header_timeout_ms,
        body = %config.server.response.body,
        "Configuration loaded"
    );

    // Bind failure is the one fatal startup error.
    let listener = Listener::bind(&config.server).await?;

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_signal(shutdown.clone()));

    let server = FixedResponseServer::new(config.server)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
