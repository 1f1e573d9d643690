//! Session storage
//!
//! Maps a bare user identifier to its [`Session`]. The backing is pluggable;
//! the in-memory store keeps everything in the process and can evict
//! sessions that have been idle for too long.

use crate::state_machine::Session;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum StoreError {
    #[allow(dead_code)] // Raised by non-memory backends
    #[error("session backend error: {0}")]
    Backend(String),
}

/// Storage for per-user sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Existing session for `id`, or a freshly stored default one
    async fn get_or_create(&self, id: &str) -> Result<Session, StoreError>;

    /// Store `session` as the current session for `id`
    async fn save(&self, id: &str, session: Session) -> Result<(), StoreError>;

    /// Overwrite the session for `id` with a default one
    async fn reset(&self, id: &str) -> Result<(), StoreError>;

    /// Drop sessions not touched for at least `max_idle`; returns how many
    async fn evict_idle(&self, max_idle: Duration) -> Result<usize, StoreError>;
}

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn get_or_create(&self, id: &str) -> Result<Session, StoreError> {
        (**self).get_or_create(id).await
    }

    async fn save(&self, id: &str, session: Session) -> Result<(), StoreError> {
        (**self).save(id, session).await
    }

    async fn reset(&self, id: &str) -> Result<(), StoreError> {
        (**self).reset(id).await
    }

    async fn evict_idle(&self, max_idle: Duration) -> Result<usize, StoreError> {
        (**self).evict_idle(max_idle).await
    }
}

struct Entry {
    session: Session,
    last_seen: Instant,
}

impl Entry {
    fn new(session: Session) -> Self {
        Self {
            session,
            last_seen: Instant::now(),
        }
    }
}

/// Process-local session store. Grows with every new identifier unless
/// [`SessionStore::evict_idle`] is called periodically.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, Entry>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)] // Used by tests
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, id: &str) -> Result<Session, StoreError> {
        let mut sessions = self.sessions.lock().await;
        let entry = sessions
            .entry(id.to_string())
            .or_insert_with(|| Entry::new(Session::default()));
        entry.last_seen = Instant::now();
        Ok(entry.session.clone())
    }

    async fn save(&self, id: &str, session: Session) -> Result<(), StoreError> {
        self.sessions
            .lock()
            .await
            .insert(id.to_string(), Entry::new(session));
        Ok(())
    }

    async fn reset(&self, id: &str) -> Result<(), StoreError> {
        self.save(id, Session::default()).await
    }

    async fn evict_idle(&self, max_idle: Duration) -> Result<usize, StoreError> {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() < max_idle);
        Ok(before - sessions.len())
    }
}
