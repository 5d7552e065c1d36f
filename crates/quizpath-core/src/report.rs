//! Quiz report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::Recommendation;
use crate::model::{Dataset, Section};
use crate::session::{AnswerRecord, QuizSession, SectionTally};
use crate::statistics::accuracy;

/// A complete record of one finished attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    /// The session this report was produced from.
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub dataset: DatasetSummary,
    pub answers: Vec<AnswerRecord>,
    /// Tallies for all four sections, including ungated ones.
    pub sections: IndexMap<Section, SectionTally>,
    /// Fraction of all answered questions that were correct.
    pub accuracy: f64,
    pub recommendation: Recommendation,
}

/// Summary of the dataset (without the questions themselves).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub question_count: usize,
    pub module_count: usize,
    pub archetype_count: usize,
}

impl QuizReport {
    pub fn new(dataset: &Dataset, session: &QuizSession, recommendation: Recommendation) -> Self {
        Self {
            id: session.id(),
            started_at: session.started_at(),
            created_at: Utc::now(),
            dataset: DatasetSummary {
                question_count: dataset.question_count(),
                module_count: dataset.meta.modules.len(),
                archetype_count: dataset.meta.archetypes.len(),
            },
            answers: session.answers().to_vec(),
            sections: session.section_counts().clone(),
            accuracy: accuracy(session.correct_count(), session.answered_count()),
            recommendation,
        }
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.correct).count()
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: QuizReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
