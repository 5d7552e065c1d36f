//! JSON dataset parser.
//!
//! Loads quiz datasets from JSON documents and validates their referential
//! integrity before any session can start.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::QuizError;
use crate::model::{Dataset, Section};

/// Parse a JSON file into a `Dataset`.
pub fn parse_dataset(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset file: {}", path.display()))?;

    parse_dataset_str(&content, &path.display().to_string())
}

/// Parse a JSON string into a `Dataset`; `source` names it in errors.
pub fn parse_dataset_str(content: &str, source: &str) -> Result<Dataset> {
    let dataset: Dataset = serde_json::from_str(content)
        .with_context(|| format!("failed to parse dataset JSON: {source}"))?;
    Ok(dataset)
}

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The dataset cannot be used.
    Error,
    /// The dataset works but probably not as intended.
    Warning,
}

/// A finding from dataset validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    pub message: String,
}

impl ValidationIssue {
    fn error(question_id: Option<&str>, message: String) -> Self {
        Self {
            severity: Severity::Error,
            question_id: question_id.map(str::to_string),
            message,
        }
    }

    fn warning(question_id: Option<&str>, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            question_id: question_id.map(str::to_string),
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Validate a dataset for integrity errors and common mistakes.
pub fn validate_dataset(dataset: &Dataset) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let config = &dataset.config;

    // Duplicate IDs
    let mut seen = HashSet::new();
    for q in &dataset.questions {
        if !seen.insert(q.id.as_str()) {
            issues.push(ValidationIssue::error(
                Some(&q.id),
                format!("duplicate question ID: {}", q.id),
            ));
        }
    }
    let mut seen = HashSet::new();
    for m in &dataset.meta.modules {
        if !seen.insert(&m.id) {
            issues.push(ValidationIssue::error(
                None,
                format!("duplicate module ID: {}", m.id),
            ));
        }
    }
    let mut seen = HashSet::new();
    for a in &dataset.meta.archetypes {
        if !seen.insert(a.id.as_str()) {
            issues.push(ValidationIssue::error(
                None,
                format!("duplicate archetype ID: {}", a.id),
            ));
        }
    }

    // Module references
    for q in &dataset.questions {
        for tag in &q.tags {
            if dataset.module(tag).is_none() {
                issues.push(ValidationIssue::error(
                    Some(&q.id),
                    QuizError::UnknownTag {
                        question_id: q.id.clone(),
                        module_id: tag.clone(),
                    }
                    .to_string(),
                ));
            }
        }
    }
    for a in &dataset.meta.archetypes {
        for id in &a.maps_to {
            if dataset.module(id).is_none() {
                issues.push(ValidationIssue::error(
                    None,
                    format!("archetype '{}' maps to unknown module {id}", a.id),
                ));
            }
        }
    }
    if dataset.module(&config.always_start_ai_at).is_none() {
        issues.push(ValidationIssue::error(
            None,
            QuizError::MissingEntryModule(config.always_start_ai_at.clone()).to_string(),
        ));
    }
    if dataset.meta.archetypes.is_empty() {
        issues.push(ValidationIssue::error(None, QuizError::NoArchetypes.to_string()));
    }

    // Question shape
    for q in &dataset.questions {
        if q.choices.is_empty() {
            issues.push(ValidationIssue::error(
                Some(&q.id),
                "question has no choices".into(),
            ));
            continue;
        }
        let correct = q.choices.iter().filter(|c| c.is_correct).count();
        if correct != 1 {
            issues.push(ValidationIssue::warning(
                Some(&q.id),
                format!("expected exactly one correct choice, found {correct}"),
            ));
        }
    }

    // Configuration
    if dataset.questions.is_empty() {
        issues.push(ValidationIssue::warning(None, "dataset has no questions".into()));
    }
    for section in Section::GATING {
        if let Some(threshold) = config.section_thresholds.for_section(section) {
            if !(0.0..=1.0).contains(&threshold) {
                issues.push(ValidationIssue::warning(
                    None,
                    format!("{section} threshold {threshold} is outside [0, 1]"),
                ));
            }
        }
        if !dataset.questions.iter().any(|q| q.section == section) {
            issues.push(ValidationIssue::warning(
                None,
                format!("no {section} questions; that section will score 0%"),
            ));
        }
    }
    if config.anchor_weight < 0.0 || config.non_anchor_weight < 0.0 {
        issues.push(ValidationIssue::warning(
            None,
            "negative question weights lower need scores on wrong answers".into(),
        ));
    }
    if config.max_recommendations_per_series == 0 {
        issues.push(ValidationIssue::warning(
            None,
            "maxRecommendationsPerSeries is 0; no ranked modules will be recommended".into(),
        ));
    }

    issues
}

/// Fail fast on the first integrity error found by [`validate_dataset`].
pub fn ensure_integrity(dataset: &Dataset) -> Result<(), QuizError> {
    for q in &dataset.questions {
        if let Some(tag) = q.tags.iter().find(|t| dataset.module(t).is_none()) {
            return Err(QuizError::UnknownTag {
                question_id: q.id.clone(),
                module_id: tag.clone(),
            });
        }
    }
    if dataset.module(&dataset.config.always_start_ai_at).is_none() {
        return Err(QuizError::MissingEntryModule(
            dataset.config.always_start_ai_at.clone(),
        ));
    }
    if dataset.meta.archetypes.is_empty() {
        return Err(QuizError::NoArchetypes);
    }
    match validate_dataset(dataset).into_iter().find(ValidationIssue::is_error) {
        Some(issue) => Err(QuizError::DataIntegrity(issue.message)),
        None => Ok(()),
    }
}
