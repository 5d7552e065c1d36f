//! Per-attempt quiz state.
//!
//! A `QuizSession` records answers one question at a time and accumulates
//! the per-section tallies and per-module need scores the recommendation
//! engine consumes. It does not own the dataset; callers pass the pieces it
//! needs so a single dataset can back any number of sessions.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;
use crate::model::{Choice, Dataset, ModuleId, Question, ScoringConfig, Section};

/// Outcome of a single answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub correct: bool,
}

/// Correct and attempted counts for one section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTally {
    pub correct: u32,
    pub total: u32,
}

/// Mutable state of one quiz attempt.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    question_count: usize,
    position: usize,
    answers: Vec<AnswerRecord>,
    module_needs: IndexMap<ModuleId, f64>,
    section_counts: IndexMap<Section, SectionTally>,
}

impl QuizSession {
    /// Start a fresh session over the given dataset's questions.
    pub fn new(dataset: &Dataset) -> Self {
        Self::with_question_count(dataset.question_count())
    }

    /// Start a fresh session over `question_count` questions.
    pub fn with_question_count(question_count: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            question_count,
            position: 0,
            answers: Vec::new(),
            module_needs: IndexMap::new(),
            section_counts: zeroed_sections(),
        }
    }

    /// Discard everything recorded so far and begin a new attempt.
    pub fn reset(&mut self) {
        self.id = Uuid::new_v4();
        self.started_at = Utc::now();
        self.position = 0;
        self.answers.clear();
        self.module_needs.clear();
        self.section_counts = zeroed_sections();
    }

    /// The question at the current position.
    pub fn current_question<'d>(&self, dataset: &'d Dataset) -> Result<&'d Question, QuizError> {
        dataset
            .questions
            .get(self.position)
            .filter(|_| !self.is_complete())
            .ok_or(QuizError::OutOfRange {
                position: self.position,
                len: self.question_count,
            })
    }

    /// Record an answer to `question` and return whether it was correct.
    ///
    /// Missed questions add the configured weight to the need score of
    /// every module the question is tagged with. Calling this twice for the
    /// same question counts it twice.
    pub fn record(
        &mut self,
        question: &Question,
        choice: &Choice,
        config: &ScoringConfig,
    ) -> Result<bool, QuizError> {
        if self.is_complete() {
            return Err(QuizError::OutOfRange {
                position: self.position,
                len: self.question_count,
            });
        }

        let correct = choice.is_correct;
        self.answers.push(AnswerRecord {
            question_id: question.id.clone(),
            correct,
        });

        let tally = self.section_counts.entry(question.section).or_default();
        tally.total += 1;
        if correct {
            tally.correct += 1;
        }

        if !correct {
            let weight = config.weight_for(question);
            for module_id in &question.tags {
                *self.module_needs.entry(module_id.clone()).or_insert(0.0) += weight;
            }
        }

        tracing::debug!(
            question = %question.id,
            section = %question.section,
            correct,
            "answer recorded"
        );

        Ok(correct)
    }

    /// Move to the next question; returns `true` once every question is done.
    pub fn advance(&mut self) -> bool {
        if self.position < self.question_count {
            self.position += 1;
        }
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.question_count
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn question_count(&self) -> usize {
        self.question_count
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.correct).count()
    }

    /// Need scores in the order modules were first missed.
    pub fn module_needs(&self) -> &IndexMap<ModuleId, f64> {
        &self.module_needs
    }

    /// Accumulated need for a module; zero when it was never missed.
    pub fn need(&self, module_id: &ModuleId) -> f64 {
        self.module_needs.get(module_id).copied().unwrap_or(0.0)
    }

    pub fn section_counts(&self) -> &IndexMap<Section, SectionTally> {
        &self.section_counts
    }

    pub fn section(&self, section: Section) -> SectionTally {
        self.section_counts.get(&section).copied().unwrap_or_default()
    }
}

fn zeroed_sections() -> IndexMap<Section, SectionTally> {
    Section::ALL
        .iter()
        .map(|&s| (s, SectionTally::default()))
        .collect()
}
