//! The `quizpath validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizpath_core::parser::{parse_dataset_str, validate_dataset};
use quizpath_loader::config::{create_source, load_config_from};
use quizpath_loader::retry::fetch_with_retry;

pub async fn execute(dataset: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let location = dataset.unwrap_or_else(|| config.dataset.clone());
    let source = create_source(&location);
    let document = fetch_with_retry(source.as_ref(), &config.retry_policy()).await?;
    let dataset = parse_dataset_str(&document, &location)?;

    println!(
        "Dataset: {location} ({} questions, {} modules, {} archetypes)",
        dataset.questions.len(),
        dataset.meta.modules.len(),
        dataset.meta.archetypes.len()
    );

    let issues = validate_dataset(&dataset);
    for issue in &issues {
        let prefix = issue
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        let label = if issue.is_error() { "ERROR" } else { "WARNING" };
        println!("{prefix} {label}: {}", issue.message);
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    let warnings = issues.len() - errors;
    if issues.is_empty() {
        println!("Dataset valid.");
    } else {
        println!("\n{errors} error(s), {warnings} warning(s) found.");
    }
    anyhow::ensure!(errors == 0, "dataset has {errors} integrity error(s)");

    Ok(())
}
