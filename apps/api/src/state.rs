use std::sync::Arc;

use crate::config::Config;
use crate::export::speech::SpeechSynthesizer;
use crate::llm_client::Generator;
use crate::session::{Session, SessionStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Text generation backend. Default: GeminiClient.
    pub generator: Arc<dyn Generator>,
    pub speech: Arc<dyn SpeechSynthesizer>,
    pub sessions: SessionStore,
}

impl AppState {
    /// Credential for a call made on behalf of `session`.
    pub fn api_key_for(&self, session: &Session) -> Option<String> {
        self.config.resolve_api_key(session.api_key.as_deref())
    }
}
