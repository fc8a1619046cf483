//! Session Store: pluggable, trait-based storage for open exam sessions.
//!
//! Default: `InMemorySessionStore` (process memory, lost on restart).
//! `AppState` holds an `Arc<dyn SessionStore>`, so a persistent backend can
//! be swapped in without touching handlers.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use crate::exam::models::ExamSession;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn put(&self, session: ExamSession);

    /// Non-consuming lookup. Expired sessions read as missing.
    async fn get(&self, id: Uuid) -> Option<ExamSession>;

    /// Atomic read-and-delete. At most one caller ever receives a given session.
    async fn take(&self, id: Uuid) -> Option<ExamSession>;

    async fn delete(&self, id: Uuid);
}

pub struct InMemorySessionStore {
    sessions: DashMap<Uuid, ExamSession>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    fn is_expired(&self, session: &ExamSession) -> bool {
        Utc::now() - session.created_at > self.ttl
    }

    /// Drops every expired session, including ones nobody will look up again.
    fn prune_expired(&self) {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !self.is_expired(session));
        let pruned = before.saturating_sub(self.sessions.len());
        if pruned > 0 {
            debug!("Pruned {pruned} expired exam sessions");
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(&self, session: ExamSession) {
        self.prune_expired();
        debug!("Storing exam session {} ({} questions)", session.id, session.questoes.len());
        self.sessions.insert(session.id, session);
    }

    async fn get(&self, id: Uuid) -> Option<ExamSession> {
        let session = self.sessions.get(&id).map(|entry| entry.value().clone())?;
        if self.is_expired(&session) {
            self.sessions.remove(&id);
            debug!("Exam session {id} expired");
            return None;
        }
        Some(session)
    }

    async fn take(&self, id: Uuid) -> Option<ExamSession> {
        let (_, session) = self.sessions.remove(&id)?;
        if self.is_expired(&session) {
            debug!("Exam session {id} expired");
            return None;
        }
        Some(session)
    }

    async fn delete(&self, id: Uuid) {
        self.sessions.remove(&id);
    }
}
