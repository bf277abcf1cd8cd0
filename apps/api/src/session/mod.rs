//! In-memory session records.
//!
//! One `Session` holds everything a user builds up while using the coach:
//! generated artifacts, the advice chat, the interview, reaction counters and
//! an optional credential typed in for this session only. Records live until
//! deleted or the process exits.

pub mod handlers;
pub mod reactions;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::session::InterviewSession;
use crate::models::artifact::ArtifactSlots;
use crate::models::chat::ChatLog;
use crate::session::reactions::Reactions;

#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Credential entered by the user. Never serialized or logged.
    pub api_key: Option<String>,
    pub artifacts: ArtifactSlots,
    pub chat: ChatLog,
    /// Pre-filled advice question picked from the quick topics.
    pub quick_topic: Option<String>,
    pub interview: InterviewSession,
    pub reactions: Reactions,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            api_key: None,
            artifacts: ArtifactSlots::default(),
            chat: ChatLog::default(),
            quick_topic: None,
            interview: InterviewSession::default(),
            reactions: Reactions::default(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to a single session. Holding the lock serializes actions on it.
pub type SessionHandle = Arc<Mutex<Session>>;

/// All live sessions. The map lock is only held for lookups and inserts; the
/// per-session mutex is what long-running actions hold.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionStore {
    pub async fn create(&self) -> SessionHandle {
        let session = Session::new();
        let id = session.id;
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, handle.clone());
        info!("Session {id} created");
        handle
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionHandle, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                info!("Session {id} discarded");
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Session {id} not found"))),
        }
    }
}
