//! Per-session result storage.
//!
//! Each browser session owns one [`ResultSlot`] holding the most recent
//! completion. Reads never mutate; a successful run overwrites the slot.
//! A session ends once its slot has gone untouched for the store's TTL;
//! expired slots are pruned on the next write.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;

use salesbrief_types::brief::CompletionResult;

/// Identifier carried in the session cookie.
pub type SessionId = Uuid;

/// How long a session keeps its result after the last successful run.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Single-slot store for the latest result. Empty means "no result yet".
#[derive(Debug, Clone)]
pub struct ResultSlot {
    current: Option<CompletionResult>,
    touched: Instant,
}

impl Default for ResultSlot {
    fn default() -> Self {
        Self {
            current: None,
            touched: Instant::now(),
        }
    }
}

impl ResultSlot {
    pub fn get(&self) -> Option<&CompletionResult> {
        self.current.as_ref()
    }

    /// Replace the held result. There is no history.
    pub fn set(&mut self, result: CompletionResult) {
        self.current = Some(result);
        self.touched = Instant::now();
    }

    pub fn is_empty(&self) -> bool {
        self.current.as_ref().is_none_or(|r| r.is_empty())
    }

    fn is_live(&self, ttl: Duration) -> bool {
        self.touched.elapsed() < ttl
    }
}

/// Result slots for all live sessions.
#[derive(Debug)]
pub struct SessionStore {
    slots: DashMap<SessionId, ResultSlot>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slots: DashMap::new(),
            ttl,
        }
    }

    /// Mint a new session id.
    pub fn new_session_id() -> SessionId {
        Uuid::now_v7()
    }

    /// Latest result for a session, if one has been stored.
    pub fn get(&self, session: &SessionId) -> Option<CompletionResult> {
        self.slots
            .get(session)
            .filter(|slot| slot.is_live(self.ttl))
            .and_then(|slot| slot.get().cloned())
    }

    /// Overwrite the session's slot with `result`, dropping expired sessions.
    pub fn set(&self, session: SessionId, result: CompletionResult) {
        self.prune_expired();
        self.slots.entry(session).or_default().set(result);
    }

    fn prune_expired(&self) {
        let before = self.slots.len();
        self.slots.retain(|_, slot| slot.is_live(self.ttl));
        let pruned = before.saturating_sub(self.slots.len());
        if pruned > 0 {
            tracing::debug!(pruned, live = self.slots.len(), "expired sessions dropped");
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
