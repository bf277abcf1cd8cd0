//! Mock interview orchestration: the two transitions that need the generator.
//!
//! Flow: setup form → questions prompt → LLM → parse → `begin()`;
//!       all answered → transcript → feedback prompt → LLM → `record_report()`.
//!
//! The session is only mutated after the generator call succeeds, so any
//! failure leaves it in its pre-call state.

use serde::Deserialize;
use tracing::{info, warn};

use crate::interview::parser::parse_questions;
use crate::interview::prompts::{
    FEEDBACK_PROMPT_TEMPLATE, FEEDBACK_SYSTEM, QUESTIONS_PROMPT_TEMPLATE, QUESTIONS_SYSTEM,
};
use crate::interview::session::{InterviewError, InterviewReport, InterviewSession, Phase};
use crate::llm_client::prompts::{fill_template, or_placeholder};
use crate::llm_client::Generator;
use crate::models::options::{ExperienceLevel, InterviewType};

pub const MIN_QUESTIONS: i64 = 3;
pub const MAX_QUESTIONS: i64 = 10;
const DEFAULT_QUESTIONS: i64 = 5;

/// Interview setup form.
#[derive(Debug, Clone, Deserialize)]
pub struct InterviewSetup {
    pub position: String,
    pub company: Option<String>,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    pub industry: Option<String>,
    #[serde(default)]
    pub interview_type: InterviewType,
    #[serde(default = "default_num_questions")]
    pub num_questions: i64,
    pub job_description: Option<String>,
}

fn default_num_questions() -> i64 {
    DEFAULT_QUESTIONS
}

impl InterviewSetup {
    fn validate(&self) -> Result<(), InterviewError> {
        if self.position.trim().is_empty() {
            return Err(InterviewError::Validation(
                "Please provide a position title".to_string(),
            ));
        }
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&self.num_questions) {
            return Err(InterviewError::Validation(format!(
                "Number of questions must be between {MIN_QUESTIONS} and {MAX_QUESTIONS}"
            )));
        }
        Ok(())
    }
}

/// SETUP → IN_PROGRESS. One generator call; nothing changes unless it succeeds
/// and at least one question can be parsed from the reply.
pub async fn generate_questions(
    interview: &mut InterviewSession,
    generator: &dyn Generator,
    api_key: Option<&str>,
    setup: &InterviewSetup,
) -> Result<(), InterviewError> {
    if interview.phase() != Phase::Setup {
        return Err(InterviewError::InvalidTransition {
            action: "generate questions",
            phase: interview.phase(),
        });
    }
    setup.validate()?;

    let prompt = build_questions_prompt(setup);
    let reply = generator
        .generate(api_key, &prompt, Some(QUESTIONS_SYSTEM))
        .await?;

    let questions = parse_questions(&reply, setup.num_questions as usize);
    if questions.len() < setup.num_questions as usize {
        warn!(
            "Requested {} interview questions, parsed {}",
            setup.num_questions,
            questions.len()
        );
    }

    interview.begin(questions)?;
    info!(
        "Interview started: {} questions for '{}'",
        interview.questions().len(),
        setup.position.trim()
    );
    Ok(())
}

/// Produces feedback for a COMPLETE interview. The report is stored on the
/// session; asking again returns the stored report without another call.
pub async fn complete_interview(
    interview: &mut InterviewSession,
    generator: &dyn Generator,
    api_key: Option<&str>,
) -> Result<InterviewReport, InterviewError> {
    let transcript = interview.transcript()?;
    if let Some(report) = interview.report() {
        return Ok(report.clone());
    }

    let prompt = build_feedback_prompt(&transcript);
    let feedback = generator
        .generate(api_key, &prompt, Some(FEEDBACK_SYSTEM))
        .await?;

    let report = InterviewReport {
        transcript,
        feedback,
    };
    interview.record_report(report.clone())?;
    info!("Interview feedback generated ({} chars)", report.feedback.len());
    Ok(report)
}

/// Fills the question template. Absent optional fields get neutral placeholders.
pub fn build_questions_prompt(setup: &InterviewSetup) -> String {
    let num_questions = setup.num_questions.to_string();
    let experience_level = setup.experience_level.to_string();
    let interview_type = setup.interview_type.to_string();
    let company = setup.company.as_deref();

    fill_template(
        QUESTIONS_PROMPT_TEMPLATE,
        &[
            ("num_questions", num_questions.as_str()),
            ("position", setup.position.trim()),
            ("company_headline", or_placeholder(company, "a company")),
            ("company", or_placeholder(company, "Generic Company")),
            ("experience_level", experience_level.as_str()),
            ("industry", or_placeholder(setup.industry.as_deref(), "General")),
            ("interview_type", interview_type.as_str()),
            (
                "job_description",
                or_placeholder(setup.job_description.as_deref(), "Not provided"),
            ),
        ],
    )
}

pub fn build_feedback_prompt(transcript: &str) -> String {
    fill_template(FEEDBACK_PROMPT_TEMPLATE, &[("transcript", transcript)])
}
