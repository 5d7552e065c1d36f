//! Post-quiz recommendation engine.
//!
//! Turns a finished session into section verdicts, ranked module
//! recommendations, an optional mandatory AI entry module, and a single
//! archetype. The pipeline runs in fixed order:
//!
//! 1. section percentages for the gating sections
//! 2. series gating against the configured thresholds
//! 3. need ranking split into primary and secondary lists
//! 4. mandatory AI entry override
//! 5. no-weakness fallback
//! 6. archetype selection

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{Archetype, Dataset, Module, ModuleId, Section, Series};
use crate::session::QuizSession;
use crate::statistics::{rank_needs, section_percentage};

/// Archetype used when no recommended module maps to any archetype.
pub const FALLBACK_ARCHETYPE_ID: &str = "asker-of-why";

/// Fraction correct for each gating section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionPercentages {
    pub foundations: f64,
    pub applied: f64,
    pub advanced: f64,
}

impl SectionPercentages {
    pub fn for_section(&self, section: Section) -> Option<f64> {
        match section {
            Section::Foundations => Some(self.foundations),
            Section::Applied => Some(self.applied),
            Section::Advanced => Some(self.advanced),
            Section::Specialized => None,
        }
    }
}

/// A recommended module together with its need score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedModule {
    pub module: Module,
    pub score: f64,
}

/// How the recommendation list was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Recommendations come from gated series (or the mandatory entry module).
    Targeted,
    /// Nothing was weak and the advanced section passed.
    Congratulations,
    /// Nothing gated matched; primary holds the raw top need scores.
    NeedFallback,
}

/// Everything the presentation layer needs after a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub section_percentages: SectionPercentages,
    /// Series gated in, in section order.
    pub series_to_consider: Vec<Series>,
    pub primary: Vec<RecommendedModule>,
    pub secondary: Vec<RecommendedModule>,
    pub mandatory: Option<Module>,
    pub outcome: Outcome,
    pub archetype: Archetype,
}

impl Recommendation {
    /// Recommended module ids in archetype-matching order: primary, then
    /// secondary, then the mandatory module.
    pub fn recommended_ids(&self) -> Vec<&ModuleId> {
        recommended_ids(&self.primary, &self.secondary, self.mandatory.as_ref())
    }
}

/// Computes recommendations against a single dataset.
pub struct RecommendationEngine<'a> {
    dataset: &'a Dataset,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// Compute the recommendation for a session's recorded answers.
    pub fn recommend(&self, session: &QuizSession) -> Result<Recommendation, QuizError> {
        let config = &self.dataset.config;
        let thresholds = &config.section_thresholds;
        let cap = config.max_recommendations_per_series;

        let entry_module = self
            .dataset
            .module(&config.always_start_ai_at)
            .ok_or_else(|| QuizError::MissingEntryModule(config.always_start_ai_at.clone()))?;

        // Step 1
        let percentages = SectionPercentages {
            foundations: section_percentage(session.section(Section::Foundations)),
            applied: section_percentage(session.section(Section::Applied)),
            advanced: section_percentage(session.section(Section::Advanced)),
        };

        // Step 2
        let series_to_consider: Vec<Series> = Section::GATING
            .iter()
            .filter_map(|&section| {
                let pct = percentages.for_section(section)?;
                let threshold = thresholds.for_section(section)?;
                if pct < threshold {
                    section.gated_series()
                } else {
                    None
                }
            })
            .collect();
        tracing::debug!(?percentages, ?series_to_consider, "series gating");

        // Step 3
        let ranked = rank_needs(session.module_needs());
        let mut primary = Vec::new();
        let mut secondary = Vec::new();
        for (id, score) in &ranked {
            let module = self.lookup(id)?;
            let gated_in = series_to_consider
                .iter()
                .any(|s| s.filter_name() == module.series.filter_name());
            if !gated_in {
                continue;
            }
            let entry = RecommendedModule {
                module: module.clone(),
                score: *score,
            };
            if primary.len() < cap {
                primary.push(entry);
            } else if secondary.len() < cap {
                secondary.push(entry);
            }
        }

        // Step 4
        let entry_id = &entry_module.id;
        let in_primary = primary.iter().any(|r| &r.module.id == entry_id);
        let in_secondary = secondary.iter().any(|r| &r.module.id == entry_id);
        let mut mandatory = None;
        if series_to_consider.contains(&Series::Ai) && !in_primary && !in_secondary {
            mandatory = Some(entry_module.clone());
        }
        if in_primary {
            secondary.retain(|r| &r.module.id != entry_id);
        }

        // Step 5
        let mut outcome = Outcome::Targeted;
        if primary.is_empty() && mandatory.is_none() {
            if percentages.advanced >= thresholds.advanced {
                mandatory = Some(entry_module.clone());
                outcome = Outcome::Congratulations;
            } else {
                for (id, score) in ranked.iter().take(cap) {
                    primary.push(RecommendedModule {
                        module: self.lookup(id)?.clone(),
                        score: *score,
                    });
                }
                outcome = Outcome::NeedFallback;
            }
        }

        // Step 6
        let ids = recommended_ids(&primary, &secondary, mandatory.as_ref());
        let archetype = pick_archetype(&self.dataset.meta.archetypes, &ids)?.clone();

        tracing::debug!(
            primary = primary.len(),
            secondary = secondary.len(),
            mandatory = ?mandatory.as_ref().map(|m| m.id.as_str()),
            ?outcome,
            archetype = %archetype.id,
            "recommendation computed"
        );

        Ok(Recommendation {
            section_percentages: percentages,
            series_to_consider,
            primary,
            secondary,
            mandatory,
            outcome,
            archetype,
        })
    }

    fn lookup(&self, id: &ModuleId) -> Result<&'a Module, QuizError> {
        self.dataset
            .module(id)
            .ok_or_else(|| QuizError::UnknownModule(id.clone()))
    }
}

fn recommended_ids<'m>(
    primary: &'m [RecommendedModule],
    secondary: &'m [RecommendedModule],
    mandatory: Option<&'m Module>,
) -> Vec<&'m ModuleId> {
    primary
        .iter()
        .chain(secondary)
        .map(|r| &r.module.id)
        .chain(mandatory.map(|m| &m.id))
        .collect()
}

/// Pick the archetype for an ordered list of recommended module ids.
///
/// Ids are tried in order; the first archetype (in declaration order) whose
/// `maps_to` contains the id wins. Without any match the `asker-of-why`
/// archetype is used, or the first archetype if that one is absent.
pub fn pick_archetype<'a>(
    archetypes: &'a [Archetype],
    ids: &[&ModuleId],
) -> Result<&'a Archetype, QuizError> {
    for id in ids {
        if let Some(found) = archetypes.iter().find(|a| a.maps_to.contains(*id)) {
            return Ok(found);
        }
    }
    archetypes
        .iter()
        .find(|a| a.id == FALLBACK_ARCHETYPE_ID)
        .or_else(|| archetypes.first())
        .ok_or(QuizError::NoArchetypes)
}
