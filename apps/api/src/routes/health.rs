use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "coach"
    }))
}

/// GET /api/v1/status
/// Whether a credential is configured outside any session, and the model in use.
pub async fn status_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "configured": state.config.has_configured_key(),
        "model": state.generator.model()
    }))
}
