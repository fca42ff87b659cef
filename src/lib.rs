//! HTTP connection-reuse benchmark harness.
//!
//! Two components, no shared state between them:
//!
//! ```text
//!   ┌──────────────────────────┐                 ┌──────────────────────────┐
//!   │      LOAD GENERATOR      │                 │   FIXED-RESPONSE SERVER  │
//!   │                          │   GET /  ───▶   │                          │
//!   │  worker 0 ──┐            │                 │  listener (backpressure) │
//!   │  worker 1 ──┼─ loop:     │                 │     → idle deadline      │
//!   │   ...       │  request,  │                 │     → hyper http1 conn   │
//!   │  worker N ──┘  drain,    │   ◀─── 200 +    │     → fixed response     │
//!   │              repeat      │   Connection:   │       (close|keep-alive) │
//!   │                          │   close|k-a     │                          │
//!   └──────────────────────────┘                 └──────────────────────────┘
//! ```
//!
//! The server answers every request with the same status/body pair and
//! enforces a configured close policy, idle keep-alive timeout, and
//! header-read timeout. The generator runs N uncoordinated request loops
//! until the process is told to stop. Both exist to let an external observer
//! measure how the server's connection-lifecycle settings affect throughput
//! and connection reuse.

// Core subsystems
pub mod config;
pub mod loadgen;
pub mod net;
pub mod server;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::BenchConfig;
pub use lifecycle::Shutdown;
pub use loadgen::LoadGenerator;
pub use server::FixedResponseServer;
