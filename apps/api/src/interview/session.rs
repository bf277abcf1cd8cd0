//! Interview session state machine.
//!
//! SETUP (no questions) → IN_PROGRESS (cursor < N) → COMPLETE (cursor == N).
//!
//! The phase is derived from `questions` and `cursor` rather than stored, so
//! "COMPLETE iff cursor == N" holds by construction. Every transition checks
//! its precondition before touching any field: a rejected action leaves the
//! session exactly as it was.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::llm_client::GenerationError;

/// Stand-in for a question the candidate skipped.
pub const NO_ANSWER_PLACEHOLDER: &str = "No answer provided";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Setup,
    InProgress,
    Complete,
}

#[derive(Debug, Error)]
pub enum InterviewError {
    #[error("Cannot {action} while the interview is in phase {phase:?}")]
    InvalidTransition { action: &'static str, phase: Phase },

    #[error("Already at the first question")]
    AtFirstQuestion,

    #[error("Please provide an answer before proceeding")]
    BlankAnswer,

    #[error("{0}")]
    Validation(String),

    #[error("No interview questions could be parsed from the response")]
    NoQuestionsParsed,

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Transcript and coach feedback for a finished interview. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterviewReport {
    pub transcript: String,
    pub feedback: String,
}

#[derive(Debug, Clone, Default)]
pub struct InterviewSession {
    questions: Vec<String>,
    /// Keyed by question index. Always a subset of `0..questions.len()`.
    answers: BTreeMap<usize, String>,
    cursor: usize,
    report: Option<InterviewReport>,
}

impl InterviewSession {
    pub fn phase(&self) -> Phase {
        if self.questions.is_empty() {
            Phase::Setup
        } else if self.cursor == self.questions.len() {
            Phase::Complete
        } else {
            Phase::InProgress
        }
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn answers(&self) -> &BTreeMap<usize, String> {
        &self.answers
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn report(&self) -> Option<&InterviewReport> {
        self.report.as_ref()
    }

    /// The question under the cursor, while the interview is in progress.
    pub fn current_question(&self) -> Option<&str> {
        match self.phase() {
            Phase::InProgress => self.questions.get(self.cursor).map(String::as_str),
            _ => None,
        }
    }

    /// The saved answer for the current question, used to pre-fill the editor.
    pub fn current_answer(&self) -> Option<&str> {
        self.current_question()?;
        self.answers.get(&self.cursor).map(String::as_str)
    }

    /// `(question number shown to the user, total)`, clamped to the total.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.questions.len();
        ((self.cursor + 1).min(total), total)
    }

    /// SETUP → IN_PROGRESS with freshly generated questions.
    pub fn begin(&mut self, questions: Vec<String>) -> Result<(), InterviewError> {
        self.require(Phase::Setup, "start an interview")?;
        if questions.is_empty() {
            return Err(InterviewError::NoQuestionsParsed);
        }

        self.questions = questions;
        self.answers.clear();
        self.cursor = 0;
        self.report = None;
        Ok(())
    }

    /// Stores the answer for the current question and moves forward.
    /// Blank input is rejected without any state change.
    pub fn answer_and_advance(&mut self, text: &str) -> Result<Phase, InterviewError> {
        self.require(Phase::InProgress, "answer a question")?;
        if text.trim().is_empty() {
            return Err(InterviewError::BlankAnswer);
        }

        self.answers.insert(self.cursor, text.to_string());
        self.cursor += 1;
        Ok(self.phase())
    }

    /// Moves back one question, first saving `draft` for the current one if it is not blank.
    pub fn go_back(&mut self, draft: Option<&str>) -> Result<(), InterviewError> {
        self.require(Phase::InProgress, "go back")?;
        if self.cursor == 0 {
            return Err(InterviewError::AtFirstQuestion);
        }

        if let Some(draft) = draft.filter(|d| !d.trim().is_empty()) {
            self.answers.insert(self.cursor, draft.to_string());
        }
        self.cursor -= 1;
        Ok(())
    }

    /// Every question paired with its answer, numbered from 1.
    pub fn transcript(&self) -> Result<String, InterviewError> {
        self.require(Phase::Complete, "summarize the interview")?;

        Ok(self
            .questions
            .iter()
            .enumerate()
            .map(|(i, question)| {
                let answer = self
                    .answers
                    .get(&i)
                    .map(String::as_str)
                    .unwrap_or(NO_ANSWER_PLACEHOLDER);
                format!("Q{n}: {question}\nA{n}: {answer}\n\n", n = i + 1)
            })
            .collect())
    }

    pub fn record_report(&mut self, report: InterviewReport) -> Result<(), InterviewError> {
        self.require(Phase::Complete, "record feedback")?;
        self.report = Some(report);
        Ok(())
    }

    /// Back to SETUP from any phase.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn require(&self, expected: Phase, action: &'static str) -> Result<(), InterviewError> {
        let phase = self.phase();
        if phase == expected {
            Ok(())
        } else {
            Err(InterviewError::InvalidTransition { action, phase })
        }
    }
}
