//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!
//! Counters live with their owners:
//!     → loadgen stats (request outcomes)
//!     → net connection tracker (accepted/active connections)
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing; level from config, env overrides
//! - No metrics endpoint; what external tools observe on the wire is the
//!   measurement of record for benchmark runs

pub mod logging;
