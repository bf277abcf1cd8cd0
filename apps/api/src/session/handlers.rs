//! Axum route handlers for the session resource itself: lifecycle, the
//! per-session credential, reactions and the connection test.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::ExportSource;
use crate::interview::handlers::InterviewView;
use crate::llm_client::prompts::CONNECTION_TEST_PROMPT;
use crate::models::artifact::ArtifactSlots;
use crate::models::chat::ChatLog;
use crate::session::reactions::{Reaction, ReactionCount, Reactions};
use crate::session::Session;
use crate::state::AppState;

/// Everything a client needs to redraw its screens. The session credential
/// is reported only as present or absent.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub has_session_key: bool,
    pub artifacts: ArtifactSlots,
    pub chat: ChatLog,
    pub quick_topic: Option<String>,
    pub interview: InterviewView,
    pub reactions: Reactions,
}

impl SessionView {
    pub fn of(session: &Session) -> Self {
        Self {
            id: session.id,
            created_at: session.created_at,
            has_session_key: session.api_key.is_some(),
            artifacts: session.artifacts.clone(),
            chat: session.chat.clone(),
            quick_topic: session.quick_topic.clone(),
            interview: InterviewView::of(&session.interview),
            reactions: session.reactions.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiKeyRequest {
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct ReactionResponse {
    pub kind: String,
    #[serde(flatten)]
    pub count: ReactionCount,
}

#[derive(Debug, Serialize)]
pub struct ConnectionTestResponse {
    pub ok: bool,
    pub response: String,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let session = state.sessions.create().await;
    let session = session.lock().await;
    Ok((StatusCode::CREATED, Json(SessionView::of(&session))))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(id).await?;
    let session = session.lock().await;
    Ok(Json(SessionView::of(&session)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/api-key
/// A blank key removes the one previously entered.
pub async fn handle_set_api_key(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ApiKeyRequest>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;

    let key = request.api_key.trim();
    session.api_key = (!key.is_empty()).then(|| key.to_string());
    info!(
        "Session {id} credential {}",
        if session.api_key.is_some() { "set" } else { "cleared" }
    );
    Ok(Json(SessionView::of(&session)))
}

/// POST /api/v1/sessions/:id/reactions/:kind/:reaction
pub async fn handle_react(
    State(state): State<AppState>,
    Path((id, kind, reaction)): Path<(Uuid, String, Reaction)>,
) -> Result<Json<ReactionResponse>, AppError> {
    let kind = kind.parse::<ExportSource>()?.name();
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;

    let count = session.reactions.record(&kind, reaction);
    Ok(Json(ReactionResponse { kind, count }))
}

/// POST /api/v1/sessions/:id/status/test
///
/// Sends a fixed greeting prompt with the credential this session would use.
/// A failed call is reported in the body rather than as an error status.
pub async fn handle_test_connection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConnectionTestResponse>, AppError> {
    let api_key = {
        let session = state.sessions.get(id).await?;
        let session = session.lock().await;
        state.api_key_for(&session)
    };

    let result = state
        .generator
        .generate(api_key.as_deref(), CONNECTION_TEST_PROMPT, None)
        .await;

    let response = match result {
        Ok(text) => ConnectionTestResponse {
            ok: true,
            response: text,
        },
        Err(e) => {
            warn!("Connection test failed for session {id}: {e}");
            ConnectionTestResponse {
                ok: false,
                response: e.sentinel(),
            }
        }
    };
    Ok(Json(response))
}
