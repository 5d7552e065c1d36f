//! End-to-end scenarios over the sample dataset.
//!
//! These load the dataset through the loader, play attempts through the
//! controller, and check the recommendation and the saved report.

use std::sync::Arc;

use quizpath_core::controller::{Phase, QuizController};
use quizpath_core::engine::Outcome;
use quizpath_core::model::{Dataset, ModuleId, Series};
use quizpath_core::report::QuizReport;
use quizpath_loader::file::FileSource;
use quizpath_loader::retry::{load_dataset, RetryPolicy};

const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../datasets/sample.json");

/// 0-based correct choices for the sample dataset, in question order.
const CORRECT: [usize; 10] = [1, 1, 0, 1, 2, 0, 0, 1, 1, 0];
const WRONG: [usize; 10] = [0, 0, 1, 0, 0, 1, 1, 0, 0, 1];

async fn sample() -> Arc<Dataset> {
    let source = FileSource::new(SAMPLE);
    Arc::new(load_dataset(&source, &RetryPolicy::default()).await.unwrap())
}

fn play(controller: &mut QuizController, answers: &[usize]) -> QuizReport {
    controller.start().unwrap();
    for &choice in answers {
        controller.submit_answer(choice).unwrap();
        controller.go_to_next().unwrap();
    }
    assert_eq!(controller.phase(), Phase::Finished);
    controller.report().unwrap()
}

fn ids(modules: &[quizpath_core::engine::RecommendedModule]) -> Vec<&str> {
    modules.iter().map(|m| m.module.id.as_str()).collect()
}

#[tokio::test]
async fn perfect_score_congratulates() {
    let mut controller = QuizController::new(sample().await);
    let report = play(&mut controller, &CORRECT);
    let rec = &report.recommendation;

    assert_eq!(report.correct_count(), 10);
    assert!(rec.series_to_consider.is_empty());
    assert!(rec.primary.is_empty());
    assert!(rec.secondary.is_empty());
    assert_eq!(rec.outcome, Outcome::Congratulations);
    assert_eq!(rec.mandatory.as_ref().unwrap().id, ModuleId::from(11));
    assert_eq!(rec.archetype.id, "asker-of-why");
}

#[tokio::test]
async fn applied_weakness_targets_advanced_series() {
    let mut answers = CORRECT;
    // Miss a1 (anchor), a2 and a3.
    answers[3] = 0;
    answers[4] = 0;
    answers[5] = 1;

    let mut controller = QuizController::new(sample().await);
    let report = play(&mut controller, &answers);
    let rec = &report.recommendation;

    assert_eq!(rec.section_percentages.applied, 0.0);
    assert_eq!(rec.series_to_consider, vec![Series::Advanced]);
    // Module 2 (Basic) also has need but its series is not gated in.
    assert_eq!(ids(&rec.primary), vec!["4", "5"]);
    assert_eq!(rec.primary[0].score, 3.0);
    assert!(rec.secondary.is_empty());
    assert!(rec.mandatory.is_none());
    assert_eq!(rec.outcome, Outcome::Targeted);
    assert_eq!(rec.archetype.id, "connector");
}

#[tokio::test]
async fn everything_wrong_fills_both_lists() {
    let mut controller = QuizController::new(sample().await);
    let report = play(&mut controller, &WRONG);
    let rec = &report.recommendation;

    assert_eq!(
        rec.series_to_consider,
        vec![Series::Basic, Series::Advanced, Series::Ai]
    );
    // Ties keep first-occurrence order: 1, 4 and 11 all have need 3.
    assert_eq!(ids(&rec.primary), vec!["1", "4", "11"]);
    assert_eq!(ids(&rec.secondary), vec!["2", "3", "5"]);
    // The entry module is already primary, so it is not repeated.
    assert!(rec.mandatory.is_none());
    assert_eq!(rec.archetype.id, "steady-builder");

    let specialized = report
        .sections
        .get(&quizpath_core::model::Section::Specialized)
        .unwrap();
    assert_eq!((specialized.correct, specialized.total), (0, 1));
}

#[tokio::test]
async fn restart_starts_from_scratch() {
    let mut controller = QuizController::new(sample().await);
    let first = play(&mut controller, &WRONG);

    controller.restart();
    assert_eq!(controller.phase(), Phase::Welcome);
    assert!(controller.report().is_none());

    let second = play(&mut controller, &CORRECT);
    assert_ne!(first.id, second.id);
    assert_eq!(second.correct_count(), 10);
    assert_eq!(second.recommendation.outcome, Outcome::Congratulations);
}

#[tokio::test]
async fn saved_report_round_trips() {
    let mut controller = QuizController::new(sample().await);
    let report = play(&mut controller, &WRONG);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    report.save_json(&path).unwrap();
    let loaded = QuizReport::load_json(&path).unwrap();

    assert_eq!(loaded.id, report.id);
    assert_eq!(loaded.recommendation, report.recommendation);
    assert_eq!(loaded.sections, report.sections);
}
