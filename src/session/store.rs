//! Session storage interface and the default in-memory backend.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;

use super::{Session, Turn};

/// Storage backend for conversation sessions.
///
/// Every mutating operation on one session id must be atomic with respect to
/// other calls for the same id. Calls for different ids must not block each
/// other for longer than a map lookup.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Return a snapshot of the session, creating an empty one if unseen.
    async fn get_or_create(&self, session_id: &str) -> Session;

    /// Return a snapshot of the session without creating it.
    async fn get(&self, session_id: &str) -> Option<Session>;

    /// Append a single turn, creating the session if needed.
    async fn append_turn(&self, session_id: &str, turn: Turn) {
        self.append_exchange(session_id, vec![turn]).await;
    }

    /// Append several turns as one atomic unit.
    async fn append_exchange(&self, session_id: &str, turns: Vec<Turn>);

    /// Record an opening prompt: set `last_prompt` and append it as an AI turn.
    async fn record_prompt(&self, session_id: &str, prompt: &str);

    /// Number of known sessions.
    async fn len(&self) -> usize;
}

/// Process-lifetime session map with per-session locking. Never evicts.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, Arc<Mutex<Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the session cell, inserting an empty session if unseen.
    ///
    /// The map shard guard is released before the caller locks the session,
    /// so a slow holder of one session never blocks lookups of others.
    fn cell(&self, session_id: &str) -> Arc<Mutex<Session>> {
        if let Some(cell) = self.sessions.get(session_id) {
            return Arc::clone(cell.value());
        }
        let cell = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(session_id, "creating session");
                Arc::new(Mutex::new(Session::default()))
            });
        Arc::clone(cell.value())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, session_id: &str) -> Session {
        self.cell(session_id).lock().clone()
    }

    async fn get(&self, session_id: &str) -> Option<Session> {
        let cell = self.sessions.get(session_id).map(|c| Arc::clone(c.value()))?;
        let session = cell.lock().clone();
        Some(session)
    }

    async fn append_exchange(&self, session_id: &str, turns: Vec<Turn>) {
        let cell = self.cell(session_id);
        cell.lock().history.extend(turns);
    }

    async fn record_prompt(&self, session_id: &str, prompt: &str) {
        let cell = self.cell(session_id);
        let mut session = cell.lock();
        session.last_prompt = Some(prompt.to_string());
        session.history.push(Turn::ai(prompt));
    }

    async fn len(&self) -> usize {
        self.sessions.len()
    }
}
