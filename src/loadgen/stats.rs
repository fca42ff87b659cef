//! Aggregate request counters.
//!
//! Purely observational: the counters exist so an operator or test can see
//! what the fleet did, never to influence scheduling.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::loadgen::worker::{FailureKind, RequestOutcome};

/// Counters shared by every worker. Updates are relaxed atomics; exactness
/// across threads at a point in time is not required.
#[derive(Debug, Default)]
pub struct LoadStats {
    completed: AtomicU64,
    failed: AtomicU64,
    timeouts: AtomicU64,
}

impl LoadStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one iteration.
    pub fn record(&self, outcome: RequestOutcome) {
        match outcome {
            RequestOutcome::Completed { .. } => {
                self.completed.fetch_add(1, Ordering::Relaxed);
            }
            RequestOutcome::Failed(kind) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                if kind == FailureKind::Timeout {
                    self.timeouts.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Point-in-time copy of the counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        let completed = self.completed.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        StatsSnapshot {
            completed,
            failed,
            timeouts: self.timeouts.load(Ordering::Relaxed),
            total: completed + failed,
        }
    }
}

/// Serializable view of the counters, printed by the CLI on exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub completed: u64,
    pub failed: u64,
    pub timeouts: u64,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_outcomes_by_kind() {
        let stats = LoadStats::new();
        stats.record(RequestOutcome::Completed { status: 200 });
        stats.record(RequestOutcome::Completed { status: 200 });
        stats.record(RequestOutcome::Failed(FailureKind::Connect));
        stats.record(RequestOutcome::Failed(FailureKind::Timeout));

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.completed, 2);
        assert_eq!(snapshot.failed, 2);
        assert_eq!(snapshot.timeouts, 1);
        assert_eq!(snapshot.total, 4);
    }

    #[test]
    fn non_success_status_counts_as_failure() {
        let stats = LoadStats::new();
        stats.record(RequestOutcome::Failed(FailureKind::Status(503)));
        assert_eq!(stats.failed(), 1);
        assert_eq!(stats.completed(), 0);
    }
}
