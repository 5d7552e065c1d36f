//! Loader configuration and source factory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizpath_core::traits::DatasetSource;

use crate::file::FileSource;
use crate::http::HttpSource;
use crate::retry::RetryPolicy;

/// Top-level quizpath configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizpathConfig {
    /// Dataset location: a file path or an `http(s)://` URL.
    #[serde(default = "default_dataset")]
    pub dataset: String,
    /// Total fetch attempts before giving up.
    #[serde(default = "default_attempts")]
    pub max_attempts: u32,
    /// Backoff base in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_base_delay_ms: u64,
    /// Output directory for saved reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_dataset() -> String {
    "data.json".to_string()
}
fn default_attempts() -> u32 {
    5
}
fn default_retry_delay() -> u64 {
    100
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizpath-results")
}

impl Default for QuizpathConfig {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
            max_attempts: default_attempts(),
            retry_base_delay_ms: default_retry_delay(),
            output_dir: default_output_dir(),
        }
    }
}

impl QuizpathConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.retry_base_delay_ms),
        )
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
pub fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    // Substituted values are never rescanned.
    let mut pos = 0;
    while let Some(offset) = result[pos..].find("${") {
        let start = pos + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
        pos = start + value.len();
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizpath.toml` in the current directory
/// 2. `~/.config/quizpath/config.toml`
///
/// `QUIZPATH_DATASET` overrides the dataset location.
pub fn load_config() -> Result<QuizpathConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizpathConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("quizpath.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizpathConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => QuizpathConfig::default(),
    };

    if let Ok(dataset) = std::env::var("QUIZPATH_DATASET") {
        config.dataset = dataset;
    }
    config.dataset = resolve_env_vars(&config.dataset);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizpath"))
}

/// Create a dataset source for a location: HTTP for `http://` and
/// `https://` URLs, the local filesystem otherwise.
pub fn create_source(location: &str) -> Box<dyn DatasetSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}
