//! quizpath-core: Quiz session, scoring, and recommendation engine.
//!
//! This crate defines the dataset model, the per-attempt session, the
//! controller that sequences user events, and the recommendation engine
//! that maps a finished attempt onto learning modules and an archetype.

pub mod controller;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod session;
pub mod statistics;
pub mod traits;

pub use controller::{AnswerFeedback, Phase, QuestionView, QuizController, Step};
pub use engine::{Outcome, Recommendation, RecommendationEngine, RecommendedModule};
pub use error::{FetchError, QuizError};
pub use model::{Dataset, ModuleId, Section, Series};
pub use session::QuizSession;
