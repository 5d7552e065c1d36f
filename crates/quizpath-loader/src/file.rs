//! Local file dataset source.

use std::path::PathBuf;

use async_trait::async_trait;

use quizpath_core::error::FetchError;
use quizpath_core::traits::DatasetSource;

/// Reads the dataset from a path on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String, FetchError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Io {
                location: self.describe(),
                message: e.to_string(),
            })
    }
}
