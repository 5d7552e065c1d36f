//! Subcommand implementations and the helpers they share.

pub mod init;
pub mod score;
pub mod take;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizpath_core::model::Dataset;
use quizpath_core::report::QuizReport;
use quizpath_core::statistics::section_percentage;
use quizpath_loader::config::{create_source, load_config_from, QuizpathConfig};
use quizpath_loader::retry::load_dataset;

/// Load the config, then fetch and check the dataset it (or `--dataset`) names.
pub(crate) async fn load(
    dataset: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<(Dataset, QuizpathConfig)> {
    let config = load_config_from(config_path.as_deref())?;
    let location = dataset.unwrap_or_else(|| config.dataset.clone());
    tracing::debug!(location = %location, "loading dataset");
    let source = create_source(&location);
    let dataset = load_dataset(source.as_ref(), &config.retry_policy()).await?;
    Ok((dataset, config))
}

/// Section score table: every tallied section with its verdict.
pub(crate) fn section_table(report: &QuizReport) -> Table {
    let rec = &report.recommendation;
    let mut table = Table::new();
    table.set_header(vec!["Section", "Correct", "Total", "Score", "Verdict"]);

    for (section, tally) in &report.sections {
        let verdict = match section.gated_series() {
            Some(series) if rec.series_to_consider.contains(&series) => {
                format!("needs work ({})", series.filter_name())
            }
            Some(_) => "pass".to_string(),
            None => "-".to_string(),
        };
        table.add_row(vec![
            Cell::new(section.heading()),
            Cell::new(tally.correct),
            Cell::new(tally.total),
            Cell::new(quizpath_report::percent(section_percentage(*tally))),
            Cell::new(verdict),
        ]);
    }
    table
}
