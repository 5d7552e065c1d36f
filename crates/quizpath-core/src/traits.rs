//! Core trait definitions.
//!
//! `DatasetSource` is implemented by the `quizpath-loader` crate for local
//! files and HTTP endpoints.

use async_trait::async_trait;

use crate::error::FetchError;

/// Somewhere a raw dataset document can be fetched from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable location (path or URL) for logs and errors.
    fn describe(&self) -> String;

    /// Fetch the raw document once. Retrying is the caller's concern.
    async fn fetch(&self) -> Result<String, FetchError>;
}
