//! Axum route handlers for the mock interview. One handler per user action;
//! each returns the interview as it stands after the action.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::coach::{complete_interview, generate_questions, InterviewSetup};
use crate::interview::session::{InterviewReport, InterviewSession, Phase};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BackRequest {
    /// Unsaved text in the editor; kept if not blank.
    pub draft: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CurrentQuestion {
    pub index: usize,
    pub text: String,
    /// Previously saved answer, for pre-filling the editor.
    pub saved_answer: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InterviewView {
    pub phase: Phase,
    /// "Question {position} of {total}"
    pub position: usize,
    pub total: usize,
    pub questions: Vec<String>,
    pub answers: BTreeMap<usize, String>,
    pub current: Option<CurrentQuestion>,
    pub report: Option<InterviewReport>,
}

impl InterviewView {
    pub fn of(interview: &InterviewSession) -> Self {
        let (position, total) = interview.progress();
        Self {
            phase: interview.phase(),
            position,
            total,
            questions: interview.questions().to_vec(),
            answers: interview.answers().clone(),
            current: interview.current_question().map(|text| CurrentQuestion {
                index: interview.cursor(),
                text: text.to_string(),
                saved_answer: interview.current_answer().map(str::to_string),
            }),
            report: interview.report().cloned(),
        }
    }
}

/// GET /api/v1/sessions/:id/interview
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewView>, AppError> {
    let session = state.sessions.get(id).await?;
    let session = session.lock().await;
    Ok(Json(InterviewView::of(&session.interview)))
}

/// POST /api/v1/sessions/:id/interview/generate
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(setup): Json<InterviewSetup>,
) -> Result<Json<InterviewView>, AppError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;
    let api_key = state.api_key_for(&session);

    generate_questions(
        &mut session.interview,
        state.generator.as_ref(),
        api_key.as_deref(),
        &setup,
    )
    .await?;
    Ok(Json(InterviewView::of(&session.interview)))
}

/// POST /api/v1/sessions/:id/interview/answer
pub async fn handle_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<InterviewView>, AppError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;

    session.interview.answer_and_advance(&request.answer)?;
    Ok(Json(InterviewView::of(&session.interview)))
}

/// POST /api/v1/sessions/:id/interview/back
pub async fn handle_back(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Option<Json<BackRequest>>,
) -> Result<Json<InterviewView>, AppError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;

    session.interview.go_back(request.draft.as_deref())?;
    Ok(Json(InterviewView::of(&session.interview)))
}

/// POST /api/v1/sessions/:id/interview/complete
pub async fn handle_complete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewReport>, AppError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;
    let api_key = state.api_key_for(&session);

    let report = complete_interview(
        &mut session.interview,
        state.generator.as_ref(),
        api_key.as_deref(),
    )
    .await?;
    Ok(Json(report))
}

/// POST /api/v1/sessions/:id/interview/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewView>, AppError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;

    session.interview.reset();
    Ok(Json(InterviewView::of(&session.interview)))
}
