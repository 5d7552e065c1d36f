//! HTML results page.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use quizpath_core::engine::{Outcome, RecommendedModule};
use quizpath_core::model::Section;
use quizpath_core::report::QuizReport;

use crate::{
    outcome_message, percent, ARCHETYPE_HEADING, ARCHETYPE_NOTE, MANDATORY_HEADING,
    PRIMARY_HEADING, SECONDARY_HEADING,
};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate the results page for a finished attempt.
pub fn generate_html(report: &QuizReport) -> String {
    let rec = &report.recommendation;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>quizpath results: {}</title>\n",
        html_escape(&rec.archetype.label)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Your results</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} of {} correct | {} | {}</p>\n",
        report.correct_count(),
        report.answers.len(),
        percent(report.accuracy),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Section scores
    html.push_str("<section class=\"scores\">\n");
    html.push_str("<div class=\"score-grid\">\n");
    let scores: Vec<(Section, f64, bool)> = Section::GATING
        .iter()
        .filter_map(|&section| {
            let pct = rec.section_percentages.for_section(section)?;
            let weak = section
                .gated_series()
                .is_some_and(|series| rec.series_to_consider.contains(&series));
            Some((section, pct, weak))
        })
        .collect();
    for (section, pct, weak) in &scores {
        html.push_str(&format!(
            "<div class=\"card score-card {}\"><span class=\"badge\">{}</span><div class=\"score-pct\">{}</div></div>\n",
            if *weak { "weak" } else { "ok" },
            section.heading(),
            percent(*pct)
        ));
    }
    html.push_str("</div>\n");
    html.push_str(&generate_bar_chart(&scores));
    html.push_str("</section>\n");

    // Recommendations
    html.push_str("<section class=\"card rec-card\">\n");
    html.push_str(&format!("<h3>{PRIMARY_HEADING}</h3>\n"));
    if let Some(message) = outcome_message(rec) {
        html.push_str(&format!("<p>{}</p>\n", html_escape(&message)));
    }
    if rec.outcome != Outcome::Congratulations {
        html.push_str(&module_list(&rec.primary, "module-item"));
    }

    if let Some(entry) = &rec.mandatory {
        html.push_str(&format!("<h3 class=\"mt-4\">{MANDATORY_HEADING}</h3>\n"));
        html.push_str(&format!(
            "<span class=\"module-item ai-module\">&bull; {} (AI Series Entry)</span>\n",
            html_escape(&entry.name)
        ));
    }

    if !rec.secondary.is_empty() {
        html.push_str(&format!("<h3 class=\"mt-4\">{SECONDARY_HEADING}</h3>\n"));
        html.push_str(&module_list(&rec.secondary, "module-item secondary-item"));
    }
    html.push_str("</section>\n");

    // Archetype
    html.push_str("<section class=\"card archetype-card\">\n");
    html.push_str(&format!("<h3 class=\"mythic-tone\">{ARCHETYPE_HEADING}</h3>\n"));
    html.push_str(&format!(
        "<strong class=\"archetype-label\">{}</strong>\n",
        html_escape(&rec.archetype.label)
    ));
    html.push_str(&format!(
        "<p class=\"archetype-desc\">{}</p>\n",
        html_escape(&rec.archetype.description)
    ));
    html.push_str(&format!("<p class=\"archetype-note\">{ARCHETYPE_NOTE}</p>\n"));
    html.push_str("</section>\n");

    // Per-answer results
    html.push_str("<section class=\"answers\">\n");
    html.push_str("<h2>Answers</h2>\n");
    html.push_str("<table>\n<thead><tr><th>#</th><th>Question</th><th>Result</th></tr></thead>\n<tbody>\n");
    for (i, answer) in report.answers.iter().enumerate() {
        let (class, text) = if answer.correct {
            ("pass", "Correct")
        } else {
            ("fail", "Incorrect")
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"{class}\">{text}</td></tr>\n",
            i + 1,
            html_escape(&answer.question_id)
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

fn module_list(modules: &[RecommendedModule], class: &str) -> String {
    modules
        .iter()
        .map(|m| {
            format!(
                "<span class=\"{class}\">&bull; {}</span>\n",
                html_escape(&m.module.name)
            )
        })
        .collect()
}

/// Write the results page to a file.
pub fn write_html_report(report: &QuizReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_bar_chart(scores: &[(Section, f64, bool)]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let total_height = scores.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (section, pct, weak)) in scores.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (pct.clamp(0.0, 1.0) * max_width as f64) as usize;
        let color = if *weak { "#ef4444" } else { "#22c55e" };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            section.heading()
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            percent(*pct)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; --accent: #6d28d9; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; --accent: #a78bfa; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.card { border: 1px solid var(--border); border-radius: 8px; padding: 1rem 1.5rem; margin: 1rem 0; }
.score-grid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; }
.score-card.weak { background: var(--fail); }
.score-card.ok { background: var(--pass); }
.badge { font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.05em; }
.score-pct { font-size: 2rem; font-weight: bold; }
.module-item { display: block; margin: 0.25rem 0; }
.secondary-item { color: #6b7280; }
.ai-module { color: var(--accent); font-weight: bold; }
.mt-4 { margin-top: 1.5rem; }
.mythic-tone { font-style: italic; }
.archetype-label { font-size: 1.5rem; color: var(--accent); }
.archetype-note { color: #6b7280; font-size: 0.9rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;
