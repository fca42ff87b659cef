//! Worker fleet supervision.
//!
//! # Responsibilities
//! - Spawn the configured number of workers
//! - Hand each worker its shutdown receiver
//! - Optionally log aggregate progress on an interval
//! - Wait for every worker to finish before returning

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinSet;
use url::Url;

use crate::config::LoadConfig;
use crate::lifecycle::Shutdown;
use crate::loadgen::stats::LoadStats;
use crate::loadgen::worker::Worker;
use crate::loadgen::LoadError;

/// Runs N independent request loops against one target URL.
///
/// Workers do not coordinate start, pacing, or shutdown among themselves;
/// the only shared signal is the shutdown broadcast.
#[derive(Debug)]
pub struct LoadGenerator {
    config: LoadConfig,
    target: Url,
    stats: Arc<LoadStats>,
}

impl LoadGenerator {
    /// Create a generator, validating the target URL up front.
    pub fn new(config: LoadConfig) -> Result<Self, LoadError> {
        let target = Url::parse(&config.target_url).map_err(|source| LoadError::InvalidUrl {
            url: config.target_url.clone(),
            source,
        })?;

        Ok(Self {
            config,
            target,
            stats: Arc::new(LoadStats::new()),
        })
    }

    /// Shared stats handle, for the CLI summary and tests.
    pub fn stats(&self) -> Arc<LoadStats> {
        Arc::clone(&self.stats)
    }

    /// Spawn the fleet and run until the shutdown signal fires.
    pub async fn run(self, shutdown: &Shutdown) -> Result<(), LoadError> {
        let request_timeout = self.config.request_timeout_ms.map(Duration::from_millis);

        tracing::info!(
            target = %self.target,
            workers = self.config.workers,
            request_timeout_ms = ?self.config.request_timeout_ms,
            "Load generator starting"
        );

        let mut workers = JoinSet::new();
        for id in 0..self.config.workers {
            let worker = Worker::new(
                id,
                self.target.clone(),
                request_timeout,
                Arc::clone(&self.stats),
            )?;
            workers.spawn(worker.run(shutdown.subscribe()));
        }

        if self.config.report_interval_secs > 0 {
            tokio::spawn(report_loop(
                Duration::from_secs(self.config.report_interval_secs),
                Arc::clone(&self.stats),
                shutdown.subscribe(),
            ));
        }

        while workers.join_next().await.is_some() {}

        let snapshot = self.stats.snapshot();
        tracing::info!(
            completed = snapshot.completed,
            failed = snapshot.failed,
            "Load generator stopped"
        );
        Ok(())
    }
}

/// Periodic aggregate progress log.
async fn report_loop(
    interval: Duration,
    stats: Arc<LoadStats>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(interval);
    // The first tick completes immediately; skip it so the first report
    // covers a full interval.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let snapshot = stats.snapshot();
                tracing::info!(
                    completed = snapshot.completed,
                    failed = snapshot.failed,
                    timeouts = snapshot.timeouts,
                    "Load progress"
                );
            }
            _ = shutdown.recv() => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_target() {
        let config = LoadConfig {
            target_url: "not a url".to_string(),
            ..LoadConfig::default()
        };
        let err = LoadGenerator::new(config).unwrap_err();
        assert!(matches!(err, LoadError::InvalidUrl { .. }));
    }

    #[test]
    fn accepts_reference_target() {
        let generator = LoadGenerator::new(LoadConfig::default()).unwrap();
        assert_eq!(generator.stats().snapshot().total, 0);
    }
}
