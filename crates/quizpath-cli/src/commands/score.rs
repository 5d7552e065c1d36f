//! The `quizpath score` command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use quizpath_core::controller::{Phase, QuizController};
use quizpath_core::report::QuizReport;
use quizpath_report::html::generate_html;
use quizpath_report::text::render_text;

use crate::OutputFormat;

pub async fn execute(
    answers_path: PathBuf,
    dataset: Option<String>,
    config_path: Option<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let answers = read_answers(&answers_path)?;
    let (dataset, _config) = super::load(dataset, config_path).await?;
    let mut controller = QuizController::new(Arc::new(dataset));

    let report = score(&mut controller, &answers)?;

    let rendered = match format {
        OutputFormat::Text => format!("{}\n{}", super::section_table(&report), render_text(&report)),
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Html => generate_html(&report),
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Results saved to: {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Parse an answers file: 1-based choice numbers separated by whitespace or
/// commas. Lines starting with `#` are ignored.
fn read_answers(path: &Path) -> Result<Vec<usize>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    parse_answers(&content)
}

fn parse_answers(content: &str) -> Result<Vec<usize>> {
    content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .flat_map(|line| line.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|token| !token.is_empty())
        .map(|token| -> Result<usize> {
            let n = token
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("invalid answer: '{token}'"))?;
            anyhow::ensure!(n >= 1, "answers are 1-based choice numbers, got 0");
            Ok(n)
        })
        .collect()
}

/// Play a full attempt with the given answers and return its report.
fn score(controller: &mut QuizController, answers: &[usize]) -> Result<QuizReport> {
    let total = controller.dataset().question_count();
    anyhow::ensure!(
        answers.len() == total,
        "answers file has {} answer(s) but the quiz has {} question(s)",
        answers.len(),
        total
    );

    controller.start()?;
    for &answer in answers {
        if controller.phase() != Phase::Answering {
            break;
        }
        let view = controller.current_question()?;
        let choices = view.question.choices.len();
        anyhow::ensure!(
            answer <= choices,
            "answer {answer} for question {} is out of range (it has {choices} choices)",
            view.question.id
        );
        controller.submit_answer(answer - 1)?;
        controller.go_to_next()?;
    }

    controller
        .report()
        .context("quiz finished without a recommendation")
}
