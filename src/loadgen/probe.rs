//! Sequential latency probe.
//!
//! Instead of sustained concurrent load, issue a fixed number of requests
//! one after another on a single client and report the average wall-clock
//! time per request. Useful for a quick comparison of server timeout
//! configurations without saturating anything.

use std::time::{Duration, Instant};

use serde::Serialize;
use url::Url;

use crate::config::LoadConfig;
use crate::loadgen::LoadError;

/// Sequential single-client prober.
pub struct Probe {
    target: Url,
    client: reqwest::Client,
}

/// Result of a probe run. Errors are counted, not surfaced; their duration
/// still contributes to the average.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProbeReport {
    pub requests: u64,
    pub errors: u64,
    pub avg_micros: u64,
}

impl Probe {
    /// Build a probe from the load configuration (target URL and optional
    /// request timeout apply; the worker count does not).
    pub fn new(config: &LoadConfig) -> Result<Self, LoadError> {
        let target = Url::parse(&config.target_url).map_err(|source| LoadError::InvalidUrl {
            url: config.target_url.clone(),
            source,
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder.build()?;

        Ok(Self { target, client })
    }

    /// Issue `requests` GETs back to back and time each one.
    pub async fn run(&self, requests: u64) -> ProbeReport {
        let mut total_micros: u128 = 0;
        let mut errors: u64 = 0;

        for _ in 0..requests {
            let start = Instant::now();
            match self.client.get(self.target.clone()).send().await {
                Ok(response) => {
                    if response.bytes().await.is_err() {
                        errors += 1;
                    }
                }
                Err(_) => {
                    errors += 1;
                }
            }
            total_micros += start.elapsed().as_micros();
        }

        let avg_micros = if requests > 0 {
            (total_micros / u128::from(requests)) as u64
        } else {
            0
        };

        ProbeReport {
            requests,
            errors,
            avg_micros,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_rejects_bad_url() {
        let config = LoadConfig {
            target_url: "::nope::".to_string(),
            ..LoadConfig::default()
        };
        assert!(Probe::new(&config).is_err());
    }

    #[tokio::test]
    async fn zero_requests_yields_empty_report() {
        let probe = Probe::new(&LoadConfig::default()).unwrap();
        let report = probe.run(0).await;
        assert_eq!(report.requests, 0);
        assert_eq!(report.errors, 0);
        assert_eq!(report.avg_micros, 0);
    }
}
