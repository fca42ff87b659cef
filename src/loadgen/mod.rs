//! Load generation subsystem.
//!
//! # Data Flow
//! ```text
//! LoadConfig
//!     → generator.rs (spawn N workers, supervise, optional progress log)
//!     → worker.rs (GET → drain body → repeat, no pacing, no coordination)
//!     → stats.rs (relaxed counters, observational only)
//!
//! probe.rs runs instead of the fleet: N sequential requests, avg latency
//! ```
//!
//! # Design Decisions
//! - A failed request is indistinguishable from a successful one for
//!   control flow; the discriminated outcome feeds only the counters
//! - Workers stop via the shared shutdown broadcast, never on their own
//! - No client-side request timeout unless configured

use thiserror::Error;

pub mod generator;
pub mod probe;
pub mod stats;
pub mod worker;

pub use generator::LoadGenerator;
pub use probe::{Probe, ProbeReport};
pub use stats::{LoadStats, StatsSnapshot};
pub use worker::{RequestOutcome, Worker};

/// Errors constructing the load generator.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The configured target URL does not parse.
    #[error("invalid target url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
