//! Fetching with exponential backoff, then parsing and integrity checks.

use std::time::Duration;

use quizpath_core::model::Dataset;
use quizpath_core::parser::{ensure_integrity, parse_dataset_str};
use quizpath_core::traits::DatasetSource;

use crate::error::LoadError;

/// How many times to fetch and how long to wait between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total fetch attempts, including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubles after each further failure.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Delay to wait after failed attempt `attempt` (0-based): `base × 2^attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.checked_mul(factor).unwrap_or(Duration::MAX)
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Fetch the raw document, retrying failed attempts with backoff.
pub async fn fetch_with_retry(
    source: &dyn DatasetSource,
    policy: &RetryPolicy,
) -> Result<String, LoadError> {
    let location = source.describe();
    let attempts = policy.attempts();
    let mut attempt = 0;

    loop {
        match source.fetch().await {
            Ok(document) => return Ok(document),
            Err(e) if attempt + 1 >= attempts => {
                return Err(LoadError::Exhausted {
                    location,
                    attempts,
                    last: e,
                });
            }
            Err(e) => {
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    location = %location,
                    attempt = attempt + 1,
                    max_attempts = attempts,
                    delay_ms = delay.as_millis() as u64,
                    "dataset fetch failed, retrying: {e}"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// Load a dataset: fetch with retry, parse, then check referential integrity.
///
/// Only fetch failures are retried. A document that fails to parse or
/// references missing modules is reported immediately.
pub async fn load_dataset(
    source: &dyn DatasetSource,
    policy: &RetryPolicy,
) -> Result<Dataset, LoadError> {
    let location = source.describe();
    let document = fetch_with_retry(source, policy).await?;

    let dataset = parse_dataset_str(&document, &location).map_err(|e| LoadError::Malformed {
        location: location.clone(),
        message: format!("{e:#}"),
    })?;

    ensure_integrity(&dataset).map_err(|source| LoadError::Integrity {
        location: location.clone(),
        source,
    })?;

    tracing::info!(
        location = %location,
        questions = dataset.questions.len(),
        modules = dataset.meta.modules.len(),
        archetypes = dataset.meta.archetypes.len(),
        "dataset loaded"
    );
    Ok(dataset)
}
