//! Axum route handlers for resume, cover letter and advice screens.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::advice::{self, AdviceView, QuickTopic};
use crate::generation::cover_letter::{generate_cover_letter, CoverLetterForm};
use crate::generation::resume::{generate_resume, ResumeForm};
use crate::models::artifact::{ArtifactKind, GeneratedArtifact};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AdviceRequest {
    pub question: String,
}

/// POST /api/v1/sessions/:id/resume
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<ResumeForm>,
) -> Result<Json<GeneratedArtifact>, AppError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;
    let api_key = state.api_key_for(&session);

    let artifact = generate_resume(
        &mut session.artifacts,
        state.generator.as_ref(),
        api_key.as_deref(),
        &form,
    )
    .await?;
    Ok(Json(artifact.clone()))
}

/// DELETE /api/v1/sessions/:id/resume
pub async fn handle_clear_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    clear_artifact(&state, id, ArtifactKind::Resume).await
}

/// POST /api/v1/sessions/:id/cover-letter
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<CoverLetterForm>,
) -> Result<Json<GeneratedArtifact>, AppError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;
    let api_key = state.api_key_for(&session);

    let artifact = generate_cover_letter(
        &mut session.artifacts,
        state.generator.as_ref(),
        api_key.as_deref(),
        &form,
    )
    .await?;
    Ok(Json(artifact.clone()))
}

/// DELETE /api/v1/sessions/:id/cover-letter
pub async fn handle_clear_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    clear_artifact(&state, id, ArtifactKind::CoverLetter).await
}

async fn clear_artifact(
    state: &AppState,
    id: Uuid,
    kind: ArtifactKind,
) -> Result<StatusCode, AppError> {
    let session = state.sessions.get(id).await?;
    session.lock().await.artifacts.clear(kind);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:id/advice
pub async fn handle_get_advice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AdviceView>, AppError> {
    let session = state.sessions.get(id).await?;
    let session = session.lock().await;
    Ok(Json(AdviceView::of(&session)))
}

/// POST /api/v1/sessions/:id/advice
pub async fn handle_ask_advice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AdviceRequest>,
) -> Result<Json<AdviceView>, AppError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;
    let api_key = state.api_key_for(&session);

    advice::ask_advice(
        &mut session,
        state.generator.as_ref(),
        api_key.as_deref(),
        &request.question,
    )
    .await?;
    Ok(Json(AdviceView::of(&session)))
}

/// POST /api/v1/sessions/:id/advice/topics/:topic
pub async fn handle_select_topic(
    State(state): State<AppState>,
    Path((id, topic)): Path<(Uuid, QuickTopic)>,
) -> Result<Json<AdviceView>, AppError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;
    advice::select_topic(&mut session, topic);
    Ok(Json(AdviceView::of(&session)))
}

/// DELETE /api/v1/sessions/:id/advice
pub async fn handle_clear_advice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let session = state.sessions.get(id).await?;
    advice::clear_chat(&mut *session.lock().await);
    Ok(StatusCode::NO_CONTENT)
}
