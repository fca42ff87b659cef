//! One independently scheduled request loop.
//!
//! # Responsibilities
//! - Issue GET requests against the fixed target, back to back, forever
//! - Drain and discard every response body
//! - Treat failures exactly like successes for control flow
//! - Stop only when the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use url::Url;

use crate::loadgen::stats::LoadStats;
use crate::loadgen::LoadError;

/// Outcome of a single loop iteration.
///
/// Consumed only by the stats counters; a worker never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Full response received and body drained.
    Completed { status: u16 },
    /// The iteration failed somewhere between connect and body drain.
    Failed(FailureKind),
}

/// Where a failed iteration went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// DNS resolution or TCP connect failed.
    Connect,
    /// The configured per-request timeout elapsed.
    Timeout,
    /// The server answered with a non-success status.
    Status(u16),
    /// The connection died mid-exchange.
    Transport,
}

impl From<&reqwest::Error> for FailureKind {
    fn from(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            FailureKind::Timeout
        } else if err.is_connect() {
            FailureKind::Connect
        } else {
            FailureKind::Transport
        }
    }
}

/// One unit of concurrent execution running the request loop.
///
/// Workers share nothing mutable except the stats counters; each owns its
/// client and therefore its connections.
pub struct Worker {
    id: usize,
    target: Url,
    client: reqwest::Client,
    stats: Arc<LoadStats>,
}

impl Worker {
    /// Build a worker with its own HTTP client.
    pub fn new(
        id: usize,
        target: Url,
        request_timeout: Option<Duration>,
        stats: Arc<LoadStats>,
    ) -> Result<Self, LoadError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            id,
            target,
            client,
            stats,
        })
    }

    /// The unbounded request loop. Completes or errors, then immediately
    /// begins the next iteration; only the shutdown signal breaks out.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::debug!(worker_id = self.id, "Worker started");
        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                outcome = self.send_one() => {
                    self.stats.record(outcome);
                }
            }
        }
        tracing::debug!(worker_id = self.id, "Worker stopped");
    }

    /// Issue one GET, wait for status + headers + body, discard the body.
    async fn send_one(&self) -> RequestOutcome {
        let response = match self.client.get(self.target.clone()).send().await {
            Ok(response) => response,
            Err(err) => return RequestOutcome::Failed(FailureKind::from(&err)),
        };

        let status = response.status();
        match response.bytes().await {
            Ok(_) if status.is_success() => RequestOutcome::Completed {
                status: status.as_u16(),
            },
            Ok(_) => RequestOutcome::Failed(FailureKind::Status(status.as_u16())),
            Err(err) => RequestOutcome::Failed(FailureKind::from(&err)),
        }
    }
}
