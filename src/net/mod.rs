//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept loop, connection limits)
//!     → connection.rs (lifecycle tracking, reuse instrumentation)
//!     → idle.rs (idle deadline for persistent connections)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - Bounded accept queue prevents resource exhaustion
//! - Each connection tracked for graceful shutdown and reuse observation
//! - Idle keep-alive enforcement lives at the I/O layer, not in hyper

pub mod connection;
pub mod idle;
pub mod listener;
