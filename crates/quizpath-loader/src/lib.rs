//! quizpath-loader: Dataset sources, retrying fetch, and configuration.
//!
//! Implements the `DatasetSource` trait for local files and HTTP, and wraps
//! any source in an exponential-backoff loader that parses and checks the
//! dataset before handing it to the quiz.

pub mod config;
pub mod error;
pub mod file;
pub mod http;
pub mod mock;
pub mod retry;

pub use config::{create_source, load_config, load_config_from, QuizpathConfig};
pub use error::LoadError;
pub use retry::{load_dataset, RetryPolicy};
