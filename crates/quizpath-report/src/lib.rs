//! quizpath-report: Rendering finished quiz reports.
//!
//! `html` produces a self-contained results page; `text` produces the
//! plain-text summary printed by the CLI. Both share the wording below.

pub mod html;
pub mod text;

use quizpath_core::engine::{Outcome, Recommendation};

/// Heading above the primary recommendations.
pub const PRIMARY_HEADING: &str = "Primary Focus";
/// Heading above the mandatory AI entry module.
pub const MANDATORY_HEADING: &str = "Mandatory Starting Point";
/// Heading above the secondary recommendations.
pub const SECONDARY_HEADING: &str = "Also Consider";
/// Heading above the archetype.
pub const ARCHETYPE_HEADING: &str = "Your Digital Path Revealed";
/// Closing line under the archetype description.
pub const ARCHETYPE_NOTE: &str = "This archetype guides your journey through our learning system.";

/// The explanatory sentence for outcomes that did not come from gating.
pub fn outcome_message(recommendation: &Recommendation) -> Option<String> {
    match recommendation.outcome {
        Outcome::Targeted => None,
        Outcome::Congratulations => {
            let entry = recommendation
                .mandatory
                .as_ref()
                .map(|m| format!(" (Module {})", m.id))
                .unwrap_or_default();
            Some(format!(
                "You aced it! You seem ready for the AI Series{entry} or can choose any specialized module you like!"
            ))
        }
        Outcome::NeedFallback => Some(
            "You performed well across all sections. Here are modules with the highest need score:"
                .to_string(),
        ),
    }
}

/// Format a 0..=1 fraction as a whole percentage.
pub fn percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}
