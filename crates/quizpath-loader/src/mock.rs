//! Mock dataset source for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizpath_core::error::FetchError;
use quizpath_core::traits::DatasetSource;

/// A scripted source that replays a fixed sequence of fetch results.
///
/// Once the script runs out, the last successful document (if any) is
/// returned again; otherwise every further call fails with a network error.
pub struct MockSource {
    script: Mutex<VecDeque<Result<String, FetchError>>>,
    fallback: Option<String>,
    call_count: AtomicU32,
}

impl MockSource {
    /// Create a mock that replays `script` in order.
    pub fn new(script: Vec<Result<String, FetchError>>) -> Self {
        let fallback = script
            .iter()
            .rev()
            .find_map(|r| r.as_ref().ok().cloned());
        Self {
            script: Mutex::new(script.into()),
            fallback,
            call_count: AtomicU32::new(0),
        }
    }

    /// Create a mock that always returns the same document.
    pub fn with_document(document: &str) -> Self {
        Self::new(vec![Ok(document.to_string())])
    }

    /// Create a mock that fails `failures` times before returning `document`.
    pub fn failing_then(failures: u32, document: &str) -> Self {
        let mut script: Vec<_> = (0..failures)
            .map(|i| Err(FetchError::Network(format!("scripted failure {}", i + 1))))
            .collect();
        script.push(Ok(document.to_string()));
        Self::new(script)
    }

    /// Get the number of fetches made against this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DatasetSource for MockSource {
    fn describe(&self) -> String {
        "mock".to_string()
    }

    async fn fetch(&self) -> Result<String, FetchError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        let next = self
            .script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();

        match next {
            Some(result) => result,
            None => self
                .fallback
                .clone()
                .ok_or_else(|| FetchError::Network("mock script exhausted".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_script_in_order() {
        let source = MockSource::failing_then(2, "{}");

        assert!(source.fetch().await.is_err());
        assert!(source.fetch().await.is_err());
        assert_eq!(source.fetch().await.unwrap(), "{}");
        // Past the end of the script the last document repeats.
        assert_eq!(source.fetch().await.unwrap(), "{}");
        assert_eq!(source.call_count(), 4);
    }

    #[tokio::test]
    async fn all_failures_stay_failing() {
        let source = MockSource::new(vec![Err(FetchError::Status {
            status: 503,
            location: "mock".into(),
        })]);

        let first = source.fetch().await.unwrap_err();
        assert!(matches!(first, FetchError::Status { status: 503, .. }));
        let second = source.fetch().await.unwrap_err();
        assert!(matches!(second, FetchError::Network(_)));
    }
}
