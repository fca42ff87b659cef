//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger shutdown broadcast
//!
//! Shutdown (shutdown.rs):
//!     broadcast → accept loop stops / workers break out of their loops
//!     → server drains in-flight connections → exit
//! ```
//!
//! # Design Decisions
//! - One broadcast channel shared by every long-running task
//! - Neither component has its own termination condition; the signal path
//!   is the only way either stops

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
