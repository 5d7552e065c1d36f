//! Session control boundary.
//!
//! `QuizController` owns the active session and turns discrete user events
//! (start, answer, next, restart) into session operations, running the
//! recommendation engine once the last question is done.

use std::sync::Arc;

use crate::engine::{Recommendation, RecommendationEngine};
use crate::error::QuizError;
use crate::model::{Dataset, Question, Section};
use crate::report::QuizReport;
use crate::session::QuizSession;

/// Where the controller is in the quiz flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No attempt in progress.
    Welcome,
    /// Waiting for an answer to the current question.
    Answering,
    /// The current question was answered; feedback is showing.
    Feedback { correct: bool },
    /// Every question is answered and the recommendation is ready.
    Finished,
}

impl Phase {
    fn describe(self) -> &'static str {
        match self {
            Phase::Welcome => "no quiz is running",
            Phase::Answering => "waiting for an answer",
            Phase::Feedback { .. } => "showing feedback",
            Phase::Finished => "the quiz is finished",
        }
    }
}

/// The question currently on screen.
#[derive(Debug, Clone, Copy)]
pub struct QuestionView<'a> {
    /// 1-based question number.
    pub number: usize,
    pub total: usize,
    pub section: Section,
    pub question: &'a Question,
}

impl QuestionView<'_> {
    pub fn progress_label(&self) -> String {
        format!(
            "Question {} of {} ({})",
            self.number, self.total, self.section
        )
    }
}

/// Immediate feedback after an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    /// The question's feedback text for this outcome.
    pub message: String,
    /// Text of the correct choice, if the question has one.
    pub correct_choice: Option<String>,
}

/// What to show after `start` or `go_to_next`.
#[derive(Debug, Clone, Copy)]
pub enum Step<'a> {
    Question(QuestionView<'a>),
    Finished(&'a Recommendation),
}

/// Drives one quiz attempt at a time over a shared dataset.
pub struct QuizController {
    dataset: Arc<Dataset>,
    session: Option<QuizSession>,
    phase: Phase,
    result: Option<Recommendation>,
}

impl QuizController {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            session: None,
            phase: Phase::Welcome,
            result: None,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn recommendation(&self) -> Option<&Recommendation> {
        self.result.as_ref()
    }

    /// Begin a fresh attempt, discarding any previous one.
    pub fn start(&mut self) -> Result<Step<'_>, QuizError> {
        self.session = Some(QuizSession::new(&self.dataset));
        self.result = None;
        self.phase = Phase::Answering;
        tracing::info!(questions = self.dataset.question_count(), "quiz started");

        if self.dataset.questions.is_empty() {
            return self.finish().map(Step::Finished);
        }
        self.current_question().map(Step::Question)
    }

    /// The question awaiting an answer (or showing feedback).
    pub fn current_question(&self) -> Result<QuestionView<'_>, QuizError> {
        let session = self.active_session("show a question")?;
        let question = session.current_question(&self.dataset)?;
        Ok(QuestionView {
            number: session.position() + 1,
            total: session.question_count(),
            section: question.section,
            question,
        })
    }

    /// Answer the current question with the choice at `choice_index`.
    pub fn submit_answer(&mut self, choice_index: usize) -> Result<AnswerFeedback, QuizError> {
        if self.phase != Phase::Answering {
            return Err(self.wrong_phase("submit an answer"));
        }
        let dataset = &*self.dataset;
        let Some(session) = self.session.as_mut() else {
            return Err(QuizError::InvalidPhase {
                operation: "submit an answer",
                phase: Phase::Welcome.describe(),
            });
        };

        let question = session.current_question(dataset)?;
        let choice = question
            .choices
            .get(choice_index)
            .ok_or(QuizError::InvalidChoice {
                index: choice_index,
                len: question.choices.len(),
            })?;
        let correct = session.record(question, choice, &dataset.config)?;
        self.phase = Phase::Feedback { correct };

        Ok(AnswerFeedback {
            correct,
            message: question.feedback(correct).to_string(),
            correct_choice: question.correct_choice().map(|c| c.text.clone()),
        })
    }

    /// Move past the answered question; finishes the quiz after the last one.
    pub fn go_to_next(&mut self) -> Result<Step<'_>, QuizError> {
        if !matches!(self.phase, Phase::Feedback { .. }) {
            return Err(self.wrong_phase("go to the next question"));
        }
        let Some(done) = self.session.as_mut().map(QuizSession::advance) else {
            return Err(self.wrong_phase("go to the next question"));
        };

        if done {
            return self.finish().map(Step::Finished);
        }
        self.phase = Phase::Answering;
        self.current_question().map(Step::Question)
    }

    /// Return to the welcome state. The next `start` begins a new attempt.
    pub fn restart(&mut self) {
        self.session = None;
        self.result = None;
        self.phase = Phase::Welcome;
    }

    /// Report for the finished attempt, if there is one.
    pub fn report(&self) -> Option<QuizReport> {
        let session = self.session.as_ref()?;
        let recommendation = self.result.clone()?;
        Some(QuizReport::new(&self.dataset, session, recommendation))
    }

    fn finish(&mut self) -> Result<&Recommendation, QuizError> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| self.wrong_phase("finish the quiz"))?;
        let recommendation = RecommendationEngine::new(&self.dataset).recommend(session)?;
        tracing::info!(
            answered = session.answered_count(),
            correct = session.correct_count(),
            archetype = %recommendation.archetype.id,
            "quiz finished"
        );
        self.phase = Phase::Finished;
        Ok(self.result.insert(recommendation))
    }

    fn active_session(&self, operation: &'static str) -> Result<&QuizSession, QuizError> {
        match (&self.session, self.phase) {
            (Some(session), Phase::Answering | Phase::Feedback { .. }) => Ok(session),
            _ => Err(self.wrong_phase(operation)),
        }
    }

    fn wrong_phase(&self, operation: &'static str) -> QuizError {
        QuizError::InvalidPhase {
            operation,
            phase: self.phase.describe(),
        }
    }
}
