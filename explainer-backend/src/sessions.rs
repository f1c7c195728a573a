//! In-memory chat sessions
//!
//! One session per uploaded document, holding the display transcript and the
//! router-facing swarm state. Nothing is persisted; sessions live for the
//! lifetime of the process.

use crate::ai::MessageRole;
use crate::swarm::{AgentName, SwarmState};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

const PREVIEW_CHARS: usize = 240;

/// One entry in the user-visible transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    /// The agent that produced an assistant entry, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentName>,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: MessageRole::User,
            content: content.into(),
            agent: None,
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>, agent: AgentName) -> Self {
        ChatMessage {
            role: MessageRole::Assistant,
            content: content.into(),
            agent: Some(agent),
            timestamp: Utc::now(),
        }
    }

    /// Turn errors are surfaced in the transcript as assistant entries with
    /// no owning agent
    pub fn error(content: impl Into<String>) -> Self {
        ChatMessage {
            role: MessageRole::Assistant,
            content: content.into(),
            agent: None,
            timestamp: Utc::now(),
        }
    }
}

pub struct ChatSession {
    pub id: Uuid,
    pub document_preview: String,
    pub transcript: Vec<ChatMessage>,
    pub state: SwarmState,
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    fn new(document_context: &str) -> Self {
        ChatSession {
            id: Uuid::new_v4(),
            document_preview: preview(document_context),
            transcript: Vec::new(),
            state: SwarmState::new(document_context),
            created_at: Utc::now(),
        }
    }
}

fn preview(content: &str) -> String {
    if content.chars().count() <= PREVIEW_CHARS {
        content.to_string()
    } else {
        let head: String = content.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    }
}

/// Concurrent session registry. Sessions are wrapped in a tokio mutex so one
/// in-flight turn owns the state exclusively.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, Arc<Mutex<ChatSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh session seeded with the document context. The new
    /// session starts with the explainer active and an empty transcript.
    pub fn create(&self, document_context: &str) -> (Uuid, Arc<Mutex<ChatSession>>) {
        let session = ChatSession::new(document_context);
        let id = session.id;
        let handle = Arc::new(Mutex::new(session));
        self.sessions.insert(id, handle.clone());
        log::info!("[SESSIONS] Created session {} ({} active)", id, self.len());
        (id, handle)
    }

    pub fn get(&self, id: &Uuid) -> Option<Arc<Mutex<ChatSession>>> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn created_session_starts_fresh() {
        let store = SessionStore::new();
        let (id, handle) = store.create("some document text");

        let session = handle.lock().await;
        assert_eq!(session.id, id);
        assert!(session.transcript.is_empty());
        assert_eq!(session.state.active, AgentName::Explainer);
        assert_eq!(session.state.messages.len(), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn get_and_remove_round_trip() {
        let store = SessionStore::new();
        let (id, _) = store.create("doc");

        assert!(store.get(&id).is_some());
        assert!(store.remove(&id));
        assert!(store.get(&id).is_none());
        assert!(!store.remove(&id));
    }

    #[test]
    fn preview_truncates_long_content() {
        let long: String = "x".repeat(1000);
        let p = preview(&long);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
        assert!(p.ends_with("..."));

        assert_eq!(preview("short"), "short");
    }
}
