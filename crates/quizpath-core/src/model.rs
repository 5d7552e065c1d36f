//! Core data model types for quizpath.
//!
//! These types mirror the dataset document: questions grouped into
//! sections, the scoring configuration, and the module/archetype metadata
//! the recommendation engine maps answers onto.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a learning module.
///
/// Datasets spell module ids either as JSON numbers or strings; both forms
/// normalize to the same id, so `11` and `"11"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawModuleId", into = "String")]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for ModuleId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<ModuleId> for String {
    fn from(id: ModuleId) -> Self {
        id.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawModuleId {
    Number(u64),
    Float(f64),
    Text(String),
}

impl From<RawModuleId> for ModuleId {
    fn from(raw: RawModuleId) -> Self {
        match raw {
            RawModuleId::Number(n) => ModuleId::from(n),
            // `11.0` displays as `11`, matching the integer spelling.
            RawModuleId::Float(n) => ModuleId(n.to_string()),
            RawModuleId::Text(s) => ModuleId(s),
        }
    }
}

/// Topic section a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    Foundations,
    Applied,
    Advanced,
    Specialized,
}

impl Section {
    /// Every recognized section, in the order tallies are kept.
    pub const ALL: [Section; 4] = [
        Section::Foundations,
        Section::Applied,
        Section::Advanced,
        Section::Specialized,
    ];

    /// The sections whose score decides whether a series is recommended.
    pub const GATING: [Section; 3] = [Section::Foundations, Section::Applied, Section::Advanced];

    /// The module series a weak score in this section calls for.
    ///
    /// `Specialized` is tallied like every other section but never gates.
    pub fn gated_series(self) -> Option<Series> {
        match self {
            Section::Foundations => Some(Series::Basic),
            Section::Applied => Some(Series::Advanced),
            Section::Advanced => Some(Series::Ai),
            Section::Specialized => None,
        }
    }

    /// Heading shown next to the section's score on the results page.
    pub fn heading(self) -> &'static str {
        match self {
            Section::Foundations => "Foundations",
            Section::Applied => "Applied Knowledge",
            Section::Advanced => "Advanced Skills",
            Section::Specialized => "Specialized",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Foundations => write!(f, "Foundations"),
            Section::Applied => write!(f, "Applied"),
            Section::Advanced => write!(f, "Advanced"),
            Section::Specialized => write!(f, "Specialized"),
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Foundations" => Ok(Section::Foundations),
            "Applied" => Ok(Section::Applied),
            "Advanced" => Ok(Section::Advanced),
            "Specialized" => Ok(Section::Specialized),
            other => Err(format!("unknown section: {other}")),
        }
    }
}

/// Module family used to gate recommendations by section performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Series {
    Basic,
    Advanced,
    Ai,
    /// A series no gating section recommends.
    Specialized,
}

impl Series {
    /// Name the series is filtered under when gating recommendations.
    pub fn filter_name(self) -> &'static str {
        match self {
            Series::Basic => "Basic",
            Series::Advanced => "Advanced",
            Series::Ai => "AI/Specialized",
            Series::Specialized => "Specialized",
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Series::Basic => write!(f, "Basic"),
            Series::Advanced => write!(f, "Advanced"),
            Series::Ai => write!(f, "AI"),
            Series::Specialized => write!(f, "Specialized"),
        }
    }
}

impl FromStr for Series {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Basic" => Ok(Series::Basic),
            "Advanced" => Ok(Series::Advanced),
            "AI" | "AI/Specialized" => Ok(Series::Ai),
            "Specialized" => Ok(Series::Specialized),
            other => Err(format!("unknown series: {other}")),
        }
    }
}

impl TryFrom<String> for Series {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Series> for String {
    fn from(series: Series) -> Self {
        series.to_string()
    }
}

/// One answer option of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// A multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique identifier for this question.
    pub id: String,
    pub section: Section,
    /// The question text shown to the user.
    pub question: String,
    pub choices: Vec<Choice>,
    /// Anchor questions weigh more when answered incorrectly.
    #[serde(default)]
    pub anchor: bool,
    /// Modules this question probes.
    #[serde(default)]
    pub tags: Vec<ModuleId>,
    #[serde(default)]
    pub feedback_correct: String,
    #[serde(default)]
    pub feedback_incorrect: String,
}

impl Question {
    /// The first choice flagged as correct, if any.
    pub fn correct_choice(&self) -> Option<&Choice> {
        self.choices.iter().find(|c| c.is_correct)
    }

    /// Feedback text for an answer of the given correctness.
    pub fn feedback(&self, correct: bool) -> &str {
        if correct {
            &self.feedback_correct
        } else {
            &self.feedback_incorrect
        }
    }
}

/// Per-section pass thresholds, as fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionThresholds {
    pub foundations: f64,
    pub applied: f64,
    pub advanced: f64,
}

impl SectionThresholds {
    /// Threshold for a gating section; `None` for `Specialized`.
    pub fn for_section(&self, section: Section) -> Option<f64> {
        match section {
            Section::Foundations => Some(self.foundations),
            Section::Applied => Some(self.applied),
            Section::Advanced => Some(self.advanced),
            Section::Specialized => None,
        }
    }
}

/// Scoring and recommendation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    /// Need added per tag when an anchor question is missed.
    pub anchor_weight: f64,
    /// Need added per tag when any other question is missed.
    pub non_anchor_weight: f64,
    pub section_thresholds: SectionThresholds,
    /// Cap on both the primary and the secondary recommendation lists.
    pub max_recommendations_per_series: usize,
    /// The AI series entry module.
    #[serde(rename = "alwaysStartAIAt")]
    pub always_start_ai_at: ModuleId,
}

impl ScoringConfig {
    pub fn weight_for(&self, question: &Question) -> f64 {
        if question.anchor {
            self.anchor_weight
        } else {
            self.non_anchor_weight
        }
    }
}

/// A learning module that can be recommended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub name: String,
    pub series: Series,
}

/// A narrative label assigned from the recommended modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Archetype {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Modules that point to this archetype, in priority order.
    #[serde(default)]
    pub maps_to: Vec<ModuleId>,
}

/// Module and archetype metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub archetypes: Vec<Archetype>,
}

/// The full quiz dataset, loaded once and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub questions: Vec<Question>,
    pub config: ScoringConfig,
    #[serde(default)]
    pub meta: Meta,
}

impl Dataset {
    pub fn module(&self, id: &ModuleId) -> Option<&Module> {
        self.meta.modules.iter().find(|m| &m.id == id)
    }

    pub fn archetype(&self, id: &str) -> Option<&Archetype> {
        self.meta.archetypes.iter().find(|a| a.id == id)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}
