//! Plain-text results summary.

use std::fmt::Write;

use quizpath_core::engine::Outcome;
use quizpath_core::model::Section;
use quizpath_core::report::QuizReport;

use crate::{
    outcome_message, percent, ARCHETYPE_HEADING, ARCHETYPE_NOTE, MANDATORY_HEADING,
    PRIMARY_HEADING, SECONDARY_HEADING,
};

/// Render the recommendation part of a report as indented plain text.
///
/// Section scores are left to the caller, which usually prints them as a
/// table.
pub fn render_recommendations(report: &QuizReport) -> String {
    let rec = &report.recommendation;
    let mut out = String::new();

    let _ = writeln!(out, "{PRIMARY_HEADING}");
    if let Some(message) = outcome_message(rec) {
        let _ = writeln!(out, "  {message}");
    }
    if rec.outcome != Outcome::Congratulations {
        if rec.primary.is_empty() && rec.mandatory.is_none() {
            let _ = writeln!(out, "  (none)");
        }
        for m in &rec.primary {
            let _ = writeln!(out, "  • {} (need {})", m.module.name, m.score);
        }
    }

    if let Some(entry) = &rec.mandatory {
        let _ = writeln!(out, "\n{MANDATORY_HEADING}");
        let _ = writeln!(out, "  • {} (AI Series Entry)", entry.name);
    }

    if !rec.secondary.is_empty() {
        let _ = writeln!(out, "\n{SECONDARY_HEADING}");
        for m in &rec.secondary {
            let _ = writeln!(out, "  • {} (need {})", m.module.name, m.score);
        }
    }

    let _ = writeln!(out, "\n{ARCHETYPE_HEADING}");
    let _ = writeln!(out, "  {}", rec.archetype.label);
    let _ = writeln!(out, "  {}", rec.archetype.description);
    let _ = writeln!(out, "  {ARCHETYPE_NOTE}");
    out
}

/// Render a full report, section scores included, as plain text.
pub fn render_text(report: &QuizReport) -> String {
    let rec = &report.recommendation;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Score: {}/{} ({})\n",
        report.correct_count(),
        report.answers.len(),
        percent(report.accuracy)
    );
    for section in Section::GATING {
        if let Some(pct) = rec.section_percentages.for_section(section) {
            let _ = writeln!(out, "{:<20} {:>4}", section.heading(), percent(pct));
        }
    }
    out.push('\n');
    out.push_str(&render_recommendations(report));
    out
}
