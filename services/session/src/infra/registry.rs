use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use vivexa_auth_types::cookie::SESSION_COOKIE_MAX_AGE;
use vivexa_domain::id::SessionId;

use crate::infra::notify::NotificationQueue;
use crate::usecase::session::SessionStore;

/// Everything held for one browser session.
#[derive(Debug, Default)]
pub struct SessionEntry {
    pub store: SessionStore,
    pub notices: NotificationQueue,
}

#[derive(Debug)]
struct Slot {
    entry: Arc<SessionEntry>,
    touched: Instant,
}

/// In-process map of live sessions keyed by cookie id.
///
/// A session untouched for longer than `idle_ttl` is treated as gone and swept on the next
/// insert.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Slot>>,
    idle_ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(Duration::from_secs(SESSION_COOKIE_MAX_AGE.unsigned_abs()))
    }
}

impl SessionRegistry {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// Look up a live session and mark it as used.
    pub fn get(&self, id: SessionId) -> Option<Arc<SessionEntry>> {
        let now = Instant::now();
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let slot = sessions.get_mut(&id)?;
        if now.duration_since(slot.touched) > self.idle_ttl {
            sessions.remove(&id);
            return None;
        }
        slot.touched = now;
        Some(Arc::clone(&slot.entry))
    }

    /// Reuse the session named by the cookie if it is still live, otherwise open a new one.
    pub fn get_or_create(&self, id: Option<SessionId>) -> (SessionId, Arc<SessionEntry>) {
        if let Some(entry) = id.and_then(|id| self.get(id).map(|entry| (id, entry))) {
            return entry;
        }
        let now = Instant::now();
        let id = SessionId::generate();
        let entry = Arc::new(SessionEntry::default());

        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, slot| now.duration_since(slot.touched) <= self.idle_ttl);
        if sessions.len() < before {
            debug!(evicted = before - sessions.len(), "evicted idle sessions");
        }
        sessions.insert(
            id,
            Slot {
                entry: Arc::clone(&entry),
                touched: now,
            },
        );
        (id, entry)
    }

    pub fn remove(&self, id: SessionId) -> Option<Arc<SessionEntry>> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .map(|slot| slot.entry)
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
