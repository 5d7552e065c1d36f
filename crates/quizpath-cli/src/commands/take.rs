//! The `quizpath take` command.

use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use quizpath_core::controller::{AnswerFeedback, Phase, QuestionView, QuizController};
use quizpath_core::report::QuizReport;
use quizpath_report::html::write_html_report;
use quizpath_report::text::render_recommendations;

pub async fn execute(
    dataset: Option<String>,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let (dataset, config) = super::load(dataset, config_path).await?;
    let output_dir = output.unwrap_or(config.output_dir);
    let mut controller = QuizController::new(Arc::new(dataset));

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_interactive(
        &mut controller,
        &mut stdin.lock(),
        &mut stdout.lock(),
        Some(&output_dir),
    )
}

/// Drive the controller from line-based input until the user quits or
/// input ends.
fn run_interactive<R: BufRead, W: Write>(
    controller: &mut QuizController,
    input: &mut R,
    out: &mut W,
    output_dir: Option<&Path>,
) -> Result<()> {
    let dataset = controller.dataset();
    let sections: BTreeSet<_> = dataset.questions.iter().map(|q| q.section).collect();
    writeln!(
        out,
        "Welcome! This quiz has {} questions across {} sections.",
        dataset.question_count(),
        sections.len()
    )?;
    writeln!(out, "Answer each question by typing the number of your choice.")?;
    writeln!(out, "Press Enter to begin.")?;
    out.flush()?;
    if read_line(input)?.is_none() {
        return Ok(());
    }

    loop {
        controller.start()?;

        while controller.phase() == Phase::Answering {
            let view = controller.current_question()?;
            print_question(out, &view)?;
            let Some(choice) = read_choice(input, out, view.question.choices.len())? else {
                return Ok(());
            };
            let feedback = controller.submit_answer(choice)?;
            print_feedback(out, &feedback)?;
            controller.go_to_next()?;
        }

        let report = controller
            .report()
            .context("quiz finished without a recommendation")?;
        print_results(out, &report)?;
        if let Some(dir) = output_dir {
            save_reports(out, &report, dir)?;
        }

        writeln!(out, "\nType r to restart, or press Enter to quit.")?;
        out.flush()?;
        match read_line(input)? {
            Some(line) if line.trim().eq_ignore_ascii_case("r") => controller.restart(),
            _ => return Ok(()),
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context("failed to read input")?;
    Ok((n > 0).then_some(line))
}

/// Prompt until a valid 1-based choice is entered. Returns the 0-based index,
/// or `None` when input ends.
fn read_choice<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    choice_count: usize,
) -> Result<Option<usize>> {
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.trim().parse::<usize>() {
            Ok(n) if (1..=choice_count).contains(&n) => return Ok(Some(n - 1)),
            _ => writeln!(out, "Please enter a number from 1 to {choice_count}.")?,
        }
    }
}

fn print_question<W: Write>(out: &mut W, view: &QuestionView<'_>) -> io::Result<()> {
    writeln!(out, "\n{}", view.progress_label())?;
    writeln!(out, "{}", view.question.question)?;
    for (i, choice) in view.question.choices.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, choice.text)?;
    }
    Ok(())
}

fn print_feedback<W: Write>(out: &mut W, feedback: &AnswerFeedback) -> io::Result<()> {
    if feedback.correct {
        writeln!(out, "Correct!")?;
    } else {
        writeln!(out, "Incorrect.")?;
        if let Some(answer) = &feedback.correct_choice {
            writeln!(out, "The correct answer is: {answer}")?;
        }
    }
    if !feedback.message.is_empty() {
        writeln!(out, "Feedback: {}", feedback.message)?;
    }
    Ok(())
}

fn print_results<W: Write>(out: &mut W, report: &QuizReport) -> io::Result<()> {
    writeln!(
        out,
        "\nQuiz complete: {} of {} correct.\n",
        report.correct_count(),
        report.answers.len()
    )?;
    writeln!(out, "{}\n", super::section_table(report))?;
    write!(out, "{}", render_recommendations(report))
}

fn save_reports<W: Write>(out: &mut W, report: &QuizReport, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

    let json_path = dir.join(format!("report-{timestamp}.json"));
    report.save_json(&json_path)?;
    writeln!(out, "Results saved to: {}", json_path.display())?;

    let html_path = dir.join(format!("report-{timestamp}.html"));
    write_html_report(report, &html_path)?;
    writeln!(out, "HTML report: {}", html_path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizpath_core::parser::parse_dataset_str;
    use std::io::Cursor;

    const DATASET: &str = r#"{
  "questions": [
    {"id": "q1", "section": "Foundations", "question": "What does CPU stand for?",
     "choices": [{"text": "Central Processing Unit", "isCorrect": true},
                 {"text": "Computer Power Unit", "isCorrect": false}],
     "tags": [1], "feedbackCorrect": "Nice.", "feedbackIncorrect": "It is the processor."},
    {"id": "q2", "section": "Advanced", "question": "What is a prompt?",
     "choices": [{"text": "Input to a model", "isCorrect": true},
                 {"text": "A shell", "isCorrect": false}],
     "tags": [11]}
  ],
  "config": {
    "anchorWeight": 2, "nonAnchorWeight": 1,
    "sectionThresholds": {"foundations": 0.7, "applied": 0.7, "advanced": 0.7},
    "maxRecommendationsPerSeries": 3, "alwaysStartAIAt": 11
  },
  "meta": {
    "modules": [
      {"id": 1, "name": "Computer Basics", "series": "Basic"},
      {"id": 11, "name": "AI 101", "series": "AI"}
    ],
    "archetypes": [
      {"id": "asker-of-why", "label": "The Asker of Why", "description": "Always curious.", "mapsTo": [11]}
    ]
  }
}"#;

    fn run(script: &str, output_dir: Option<&Path>) -> (String, QuizController) {
        let dataset = parse_dataset_str(DATASET, "test.json").unwrap();
        let mut controller = QuizController::new(Arc::new(dataset));
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        run_interactive(&mut controller, &mut input, &mut out, output_dir).unwrap();
        (String::from_utf8(out).unwrap(), controller)
    }

    #[test]
    fn full_attempt() {
        let (out, controller) = run("\n2\n1\n\n", None);

        assert!(out.contains("This quiz has 2 questions across 2 sections."));
        assert!(out.contains("Question 1 of 2 (Foundations)"));
        assert!(out.contains("Incorrect."));
        assert!(out.contains("The correct answer is: Central Processing Unit"));
        assert!(out.contains("Feedback: It is the processor."));
        assert!(out.contains("Quiz complete: 1 of 2 correct."));
        assert!(out.contains("Computer Basics"));
        assert!(out.contains("The Asker of Why"));
        assert_eq!(controller.phase(), Phase::Finished);
    }

    #[test]
    fn invalid_choices_reprompt() {
        let (out, controller) = run("\n0\nabc\n3\n1\n1\n", None);

        assert_eq!(out.matches("Please enter a number from 1 to 2.").count(), 3);
        assert!(out.contains("Quiz complete: 2 of 2 correct."));
        assert!(out.contains("You aced it!"));
        assert_eq!(controller.session().unwrap().correct_count(), 2);
    }

    #[test]
    fn restart_runs_a_new_attempt() {
        let (out, controller) = run("\n1\n1\nr\n2\n2\nq\n", None);

        assert_eq!(out.matches("Quiz complete").count(), 2);
        assert!(out.contains("Quiz complete: 0 of 2 correct."));
        assert_eq!(controller.session().unwrap().correct_count(), 0);
    }

    #[test]
    fn input_ending_mid_quiz_exits_cleanly() {
        let (out, controller) = run("\n1\n", None);
        assert!(!out.contains("Quiz complete"));
        assert_eq!(controller.phase(), Phase::Answering);
    }

    #[test]
    fn saves_reports_when_output_dir_given() {
        let dir = tempfile::tempdir().unwrap();
        let (out, _) = run("\n1\n1\n", Some(dir.path()));

        assert!(out.contains("Results saved to:"));
        let files: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|p| p.extension().is_some_and(|e| e == "json")));
        assert!(files.iter().any(|p| p.extension().is_some_and(|e| e == "html")));
    }
}
