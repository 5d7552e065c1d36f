//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE: &str = "../../datasets/sample.json";

/// 1-based correct choices for the sample dataset, in question order.
const ALL_CORRECT: &str = "2 2 1 2 3 1 1 2 2 1";
const ALL_WRONG: &str = "1 1 2 1 1 2 2 1 1 2";

fn quizpath() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizpath").unwrap()
}

/// A temp dir holding a config that never waits between fetch attempts.
fn fast_config() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quizpath.toml");
    std::fs::write(&path, "max_attempts = 1\nretry_base_delay_ms = 1\n").unwrap();
    (dir, path)
}

fn answers_file(dir: &TempDir, answers: &str) -> std::path::PathBuf {
    let path = dir.path().join("answers.txt");
    std::fs::write(&path, answers).unwrap();
    path
}

#[test]
fn validate_sample_dataset() {
    quizpath()
        .arg("validate")
        .arg("--dataset")
        .arg(SAMPLE)
        .assert()
        .success()
        .stdout(predicate::str::contains("10 questions, 9 modules, 4 archetypes"))
        .stdout(predicate::str::contains("Dataset valid."));
}

#[test]
fn validate_reads_dataset_from_env() {
    quizpath()
        .arg("validate")
        .env("QUIZPATH_DATASET", SAMPLE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dataset valid."));
}

#[test]
fn validate_reports_dangling_tag() {
    let (dir, config) = fast_config();
    let broken = std::fs::read_to_string(SAMPLE)
        .unwrap()
        .replace("\"tags\": [14]", "\"tags\": [99]");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, broken).unwrap();

    quizpath()
        .arg("validate")
        .arg("--config")
        .arg(&config)
        .arg("--dataset")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("[s1] ERROR"))
        .stderr(predicate::str::contains("integrity error"));
}

#[test]
fn validate_nonexistent_file() {
    let (_dir, config) = fast_config();
    quizpath()
        .arg("validate")
        .arg("--config")
        .arg(&config)
        .arg("--dataset")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("after 1 attempt(s)"));
}

#[test]
fn score_perfect_run() {
    let dir = TempDir::new().unwrap();
    let answers = answers_file(&dir, ALL_CORRECT);

    quizpath()
        .arg("score")
        .arg("--dataset")
        .arg(SAMPLE)
        .arg("--answers")
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 10/10 (100%)"))
        .stdout(predicate::str::contains("You aced it!"))
        .stdout(predicate::str::contains("AI 101 (AI Series Entry)"))
        .stdout(predicate::str::contains("The Asker of Why"));
}

#[test]
fn score_all_wrong_ranks_needs() {
    let dir = TempDir::new().unwrap();
    let answers = answers_file(&dir, ALL_WRONG);

    quizpath()
        .arg("score")
        .arg("--dataset")
        .arg(SAMPLE)
        .arg("--answers")
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("needs work (Basic)"))
        .stdout(predicate::str::contains("• Computer Essentials (need 3)"))
        .stdout(predicate::str::contains("Also Consider"))
        .stdout(predicate::str::contains("• Staying Safe Online (need 2)"))
        .stdout(predicate::str::contains("Mandatory Starting Point").not())
        .stdout(predicate::str::contains("The Steady Builder"));
}

#[test]
fn score_json_output() {
    let dir = TempDir::new().unwrap();
    let answers = answers_file(&dir, ALL_CORRECT);

    let output = quizpath()
        .arg("score")
        .arg("--dataset")
        .arg(SAMPLE)
        .arg("--answers")
        .arg(&answers)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["recommendation"]["outcome"], "congratulations");
    assert_eq!(report["recommendation"]["archetype"]["id"], "asker-of-why");
    assert_eq!(report["answers"].as_array().unwrap().len(), 10);
}

#[test]
fn score_html_to_file() {
    let dir = TempDir::new().unwrap();
    let answers = answers_file(&dir, ALL_WRONG);
    let out = dir.path().join("out").join("results.html");

    quizpath()
        .arg("score")
        .arg("--dataset")
        .arg(SAMPLE)
        .arg("--answers")
        .arg(&answers)
        .arg("--format")
        .arg("html")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Results saved to"));

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("<html"));
    assert!(html.contains("Your Digital Path Revealed"));
}

#[test]
fn score_rejects_short_answers_file() {
    let dir = TempDir::new().unwrap();
    let answers = answers_file(&dir, "1 2 3");

    quizpath()
        .arg("score")
        .arg("--dataset")
        .arg(SAMPLE)
        .arg("--answers")
        .arg(&answers)
        .assert()
        .failure()
        .stderr(predicate::str::contains("3 answer(s) but the quiz has 10"));
}

#[test]
fn take_interactive_run() {
    let dir = TempDir::new().unwrap();
    let script = format!("\n{}\n\n", ALL_CORRECT.replace(' ', "\n"));

    quizpath()
        .arg("take")
        .arg("--dataset")
        .arg(SAMPLE)
        .arg("--output")
        .arg(dir.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1 of 10 (Foundations)"))
        .stdout(predicate::str::contains("Question 10 of 10 (Specialized)"))
        .stdout(predicate::str::contains("Quiz complete: 10 of 10 correct."))
        .stdout(predicate::str::contains("Type r to restart"));
}

#[test]
fn take_saves_reports() {
    let dir = TempDir::new().unwrap();
    let script = format!("\n{}\n", ALL_WRONG.replace(' ', "\n"));

    quizpath()
        .arg("take")
        .arg("--dataset")
        .arg(SAMPLE)
        .arg("--output")
        .arg(dir.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Results saved to"));

    let count = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(count, 2);
}

#[test]
fn take_saves_reports_to_configured_output_dir() {
    let dir = TempDir::new().unwrap();
    let results = dir.path().join("results");
    let config = dir.path().join("quizpath.toml");
    std::fs::write(
        &config,
        format!("output_dir = {:?}\n", results.display().to_string()),
    )
    .unwrap();
    let script = format!("\n{}\n", ALL_WRONG.replace(' ', "\n"));

    quizpath()
        .arg("take")
        .arg("--dataset")
        .arg(SAMPLE)
        .arg("--config")
        .arg(&config)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("This quiz has 10 questions across 4 sections."))
        .stdout(predicate::str::contains("Results saved to"));

    let count = std::fs::read_dir(&results).unwrap().count();
    assert_eq!(count, 2);
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizpath()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizpath.toml"))
        .stdout(predicate::str::contains("Created data.json"));

    assert!(dir.path().join("quizpath.toml").exists());

    // The starter files work together out of the box.
    quizpath()
        .current_dir(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dataset valid."));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizpath().current_dir(dir.path()).arg("init").assert().success();

    quizpath()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    quizpath()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("learning-path recommendations"));
}

#[test]
fn version_output() {
    quizpath()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizpath"));
}
