use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::instrument;

use pulse_core::{InteractionEvent, SessionId};

/// Per-session event history cap. Oldest entries drop first once a
/// session exceeds it; `click_count` still covers every click ever seen.
pub const MAX_EVENTS_PER_SESSION: usize = 256;

/// Per-session state. Owned exclusively by the store; clones handed out
/// by [`SessionStore::get`] are point-in-time views.
#[derive(Clone, Debug)]
pub struct Session {
    pub id: SessionId,
    pub started_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub click_count: u64,
    pub events: VecDeque<InteractionEvent>,
}

/// Concurrent collection of sessions keyed by session id.
///
/// One coarse read/write lock guards the whole map, not sharded. Every
/// `upsert`/`active_count`/`evict` serializes on it; `evict` holds it for
/// a full O(n) sweep, which lengthens tail latency for concurrent
/// ingestion at large session counts. Sharding by session-id hash is the
/// known scaling path.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold an event into its session, creating the session on first
    /// sight of the id. Returns `true` when a session was created, so the
    /// caller can advance the sessions-ever-created counter.
    pub fn upsert(&self, event: &InteractionEvent) -> bool {
        self.upsert_at(event, Utc::now())
    }

    /// Clock-injected variant of [`upsert`](Self::upsert).
    pub fn upsert_at(&self, event: &InteractionEvent, now: DateTime<Utc>) -> bool {
        let mut sessions = self.sessions.write();
        let created = !sessions.contains_key(&event.session_id);
        let session = sessions
            .entry(event.session_id.clone())
            .or_insert_with(|| Session {
                id: event.session_id.clone(),
                started_at: now,
                last_active: now,
                click_count: 0,
                events: VecDeque::new(),
            });

        session.last_active = now;
        if session.events.len() == MAX_EVENTS_PER_SESSION {
            session.events.pop_front();
        }
        session.events.push_back(event.clone());
        if event.is_click() {
            session.click_count += 1;
        }
        created
    }

    /// Number of sessions currently resident ("active users").
    pub fn active_count(&self) -> usize {
        self.sessions.read().len()
    }

    /// Point-in-time clone of one session.
    pub fn get(&self, id: &SessionId) -> Option<Session> {
        self.sessions.read().get(id).cloned()
    }

    /// Remove every session idle longer than `max_age`. Returns the number
    /// removed. Holds the write lock for the whole sweep; safe to call
    /// concurrently with ingestion and with itself, and a no-op when
    /// nothing is stale.
    #[instrument(skip(self))]
    pub fn evict(&self, max_age: Duration) -> usize {
        self.evict_at(max_age, Utc::now())
    }

    /// Clock-injected variant of [`evict`](Self::evict).
    pub fn evict_at(&self, max_age: Duration, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, session| {
            let idle = now
                .signed_duration_since(session.last_active)
                .to_std()
                .unwrap_or_default();
            idle <= max_age
        });
        before - sessions.len()
    }
}
