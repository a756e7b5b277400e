//! Session state store
//!
//! A session is an append-only, ordered log of chat turns for one user
//! connection. It is an explicit handle: the web server keeps one per browser
//! tab in a `SessionRegistry`, the terminal client owns one directly.

use super::errors::SessionError;
use super::types::ChatTurn;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};

/// Whether a session is waiting on the answer service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Sending,
}

struct SessionInner {
    id: String,
    created_at: DateTime<Utc>,
    turns: RwLock<Vec<ChatTurn>>,
    sending: AtomicBool,
    /// Turn count after the latest append
    changes: watch::Sender<usize>,
}

/// Cheap-to-clone handle to one chat session
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            inner: Arc::new(SessionInner {
                id: id.into(),
                created_at: Utc::now(),
                turns: RwLock::new(Vec::new()),
                sending: AtomicBool::new(false),
                changes,
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// Append a turn and notify subscribers. Returns the new turn count.
    pub async fn append(&self, turn: ChatTurn) -> usize {
        let len = {
            let mut turns = self.inner.turns.write().await;
            turns.push(turn);
            turns.len()
        };
        self.inner.changes.send_replace(len);
        len
    }

    /// Snapshot of every turn in order
    pub async fn all(&self) -> Vec<ChatTurn> {
        self.inner.turns.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.turns.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.turns.read().await.is_empty()
    }

    /// Receive the turn count every time the session changes
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.inner.changes.subscribe()
    }

    pub fn state(&self) -> SessionState {
        if self.inner.sending.load(Ordering::Acquire) {
            SessionState::Sending
        } else {
            SessionState::Idle
        }
    }

    pub fn is_sending(&self) -> bool {
        self.state() == SessionState::Sending
    }

    /// Mark the session as sending. Returns `None` when a submission is
    /// already in flight. The flag clears when the guard drops.
    pub(crate) fn begin_send(&self) -> Option<SendGuard> {
        self.inner
            .sending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SendGuard {
                inner: self.inner.clone(),
            })
    }
}

/// Holds a session in the `Sending` state
pub(crate) struct SendGuard {
    inner: Arc<SessionInner>,
}

impl Drop for SendGuard {
    fn drop(&mut self) {
        self.inner.sending.store(false, Ordering::Release);
    }
}

/// Session summary for listings
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub turn_count: usize,
    pub state: SessionState,
}

impl Session {
    pub async fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id().to_string(),
            created_at: self.created_at(),
            turn_count: self.len().await,
            state: self.state(),
        }
    }
}

/// Live sessions of the web UI, keyed by id
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new empty session
    pub fn create(&self) -> Session {
        let session = Session::new();
        self.sessions
            .insert(session.id().to_string(), session.clone());
        tracing::info!("Session {} started", session.id());
        session
    }

    pub fn get(&self, id: &str) -> Result<Session, SessionError> {
        self.sessions
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// End a session and drop its turns
    pub fn end(&self, id: &str) -> Result<(), SessionError> {
        self.sessions
            .remove(id)
            .map(|_| tracing::info!("Session {} ended", id))
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
