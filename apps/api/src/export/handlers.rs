//! Axum route handlers for downloads.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use chrono::Local;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::pdf::render_pdf;
use crate::export::{audio_filename, pdf_filename, ExportSource};
use crate::state::AppState;

/// GET /api/v1/sessions/:id/export/:kind/pdf
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, String)>,
) -> Result<Response, AppError> {
    let source: ExportSource = kind.parse()?;
    let text = {
        let session = state.sessions.get(id).await?;
        let session = session.lock().await;
        source.resolve(&session)?
    };

    let bytes = tokio::task::spawn_blocking(move || render_pdf(&text))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF render task failed: {e}")))??;

    let filename = pdf_filename(&source.name(), &Local::now());
    info!("Exported {filename} ({} bytes)", bytes.len());
    Ok(attachment("application/pdf", filename, bytes))
}

/// GET /api/v1/sessions/:id/export/:kind/speech
pub async fn handle_export_speech(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, String)>,
) -> Result<Response, AppError> {
    let source: ExportSource = kind.parse()?;
    let text = {
        let session = state.sessions.get(id).await?;
        let session = session.lock().await;
        source.resolve(&session)?
    };

    let audio = state.speech.synthesize(&text).await?;

    let filename = audio_filename(&source.name(), &Local::now());
    info!("Synthesized {filename} ({} bytes)", audio.len());
    Ok(attachment("audio/mpeg", filename, audio))
}

fn attachment(content_type: &str, filename: String, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        Bytes::from(body),
    )
        .into_response()
}
