//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the logging subsystem for both binaries
//! - Let the environment override the configured level
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the config-file level when set

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// `default_level` comes from the config file and is used when `RUST_LOG`
/// is not set. Calling this twice panics, so each binary calls it once.
pub fn init(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("connbench={}", default_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
