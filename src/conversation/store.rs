//! In-memory session store
//!
//! Holds one transcript per session id for the lifetime of the process.
//! Sessions are created lazily on first use, seeded with the persona system
//! turn, and handed out as shared handles so the caller's mutations are
//! visible to every later request with the same id.
//!
//! Each transcript sits behind its own async mutex. Holding that lock for a
//! full turn serializes concurrent requests on one session id; requests on
//! different sessions proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tokio::sync::Mutex as AsyncMutex;

use super::message::Message;

/// Shared handle to one session's transcript
pub type SessionHandle = Arc<AsyncMutex<Vec<Message>>>;

struct SessionEntry {
    transcript: SessionHandle,
    last_used: Instant,
}

/// Thread-safe store of per-session conversation transcripts
///
/// Construct one store per process and pass it by reference into the request
/// handler; tests build isolated instances.
pub struct SessionStore {
    persona: String,
    capacity: Option<usize>,
    sessions: Mutex<HashMap<String, SessionEntry>>,
}

impl SessionStore {
    /// Create an unbounded store seeding new sessions with `persona`
    pub fn new(persona: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            capacity: None,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Bound the store to `capacity` live sessions
    ///
    /// When a new session would exceed the bound, the least-recently-used
    /// session is evicted. Without a bound the store grows with every
    /// distinct session id, matching the original service's behavior.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity.max(1));
        self
    }

    /// Fetch the transcript for `session_id`, creating it on first sight
    ///
    /// A new transcript contains exactly one system turn with the persona
    /// text. Calling this twice with the same unseen id creates one session.
    pub fn get_or_create(&self, session_id: &str) -> SessionHandle {
        let mut sessions = self.sessions.lock().expect("session map poisoned");

        if let Some(entry) = sessions.get_mut(session_id) {
            entry.last_used = Instant::now();
            return Arc::clone(&entry.transcript);
        }

        if let Some(capacity) = self.capacity {
            if sessions.len() >= capacity {
                Self::evict_lru(&mut sessions);
            }
        }

        tracing::debug!("Creating session: {}", session_id);

        let transcript: SessionHandle =
            Arc::new(AsyncMutex::new(vec![Message::system(&self.persona)]));
        sessions.insert(
            session_id.to_string(),
            SessionEntry {
                transcript: Arc::clone(&transcript),
                last_used: Instant::now(),
            },
        );

        transcript
    }

    /// Check whether a session exists without creating it
    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions
            .lock()
            .expect("session map poisoned")
            .contains_key(session_id)
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.lock().expect("session map poisoned").len()
    }

    /// Whether the store holds no sessions
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn evict_lru(sessions: &mut HashMap<String, SessionEntry>) {
        let oldest = sessions
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(id, _)| id.clone());

        if let Some(id) = oldest {
            tracing::info!("Evicting least-recently-used session: {}", id);
            sessions.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::message::Role;

    #[tokio::test]
    async fn test_new_session_starts_with_system_turn() {
        let store = SessionStore::new("persona text");
        let session = store.get_or_create("s1");

        let transcript = session.lock().await;
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].role, Role::System);
        assert_eq!(transcript[0].content, "persona text");
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let store = SessionStore::new("persona");
        let first = store.get_or_create("s1");
        let second = store.get_or_create("s1");

        assert_eq!(store.len(), 1);
        // Both handles point at the same transcript
        first.lock().await.push(Message::user("hello"));
        assert_eq!(second.lock().await.len(), 2);
        // Exactly one system turn
        let transcript = first.lock().await;
        let system_turns = transcript.iter().filter(|m| m.role == Role::System).count();
        assert_eq!(system_turns, 1);
    }

    #[tokio::test]
    async fn test_mutations_visible_across_lookups() {
        let store = SessionStore::new("persona");
        store
            .get_or_create("s1")
            .lock()
            .await
            .push(Message::user("hi"));

        let transcript = store.get_or_create("s1");
        assert_eq!(transcript.lock().await.len(), 2);
    }

    #[test]
    fn test_distinct_ids_get_distinct_sessions() {
        let store = SessionStore::new("persona");
        store.get_or_create("a");
        store.get_or_create("b");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_capacity_evicts_least_recently_used() {
        let store = SessionStore::new("persona").with_capacity(2);
        store.get_or_create("a");
        store.get_or_create("b");
        // Touch "a" so "b" becomes the LRU entry
        store.get_or_create("a");
        store.get_or_create("c");

        assert_eq!(store.len(), 2);
        assert!(store.contains("a"));
        assert!(store.contains("c"));
        assert!(!store.contains("b"));
    }

    #[test]
    fn test_unbounded_by_default() {
        let store = SessionStore::new("persona");
        for i in 0..100 {
            store.get_or_create(&format!("s{}", i));
        }
        assert_eq!(store.len(), 100);
    }
}
