//! Session registry
//!
//! Owns all presence state: one `Session` per live connection. Access is
//! serialized behind a single lock; every mutation is one atomic map
//! operation that returns the prior state, so a concurrent occupant scan
//! observes a transition either entirely before or entirely after, never
//! half-applied.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use banter_core::{ConnectionId, RoomId, Session};

/// Registry of connected sessions
pub struct SessionRegistry {
    sessions: RwLock<HashMap<ConnectionId, Session>>,

    /// Monotonic registration counter; ties display-name resolution to
    /// registration order when names collide
    next_seq: AtomicU64,
}

impl SessionRegistry {
    /// Create a new, empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Create a new registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a session for a connection.
    ///
    /// Overwrites any prior entry for that connection. Display names are
    /// not required to be unique across sessions.
    pub fn register(&self, connection_id: ConnectionId, display_name: impl Into<String>) {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let session = Session::new(display_name, seq);

        self.sessions.write().insert(connection_id, session);

        tracing::debug!(connection_id = %connection_id, "Session registered");
    }

    /// Get a snapshot of a session, if registered
    pub fn lookup(&self, connection_id: ConnectionId) -> Option<Session> {
        self.sessions.read().get(&connection_id).cloned()
    }

    /// Set or clear a session's current room, returning the prior state.
    ///
    /// The swap is a single atomic map operation. Returns `None` without
    /// mutating anything if the connection is unknown.
    pub fn set_room(&self, connection_id: ConnectionId, room: Option<RoomId>) -> Option<Session> {
        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(&connection_id)?;

        let prior = session.clone();
        session.current_room = room;
        Some(prior)
    }

    /// Remove a session, returning the prior state.
    ///
    /// Idempotent: removing an already-removed connection returns `None`.
    pub fn remove(&self, connection_id: ConnectionId) -> Option<Session> {
        let removed = self.sessions.write().remove(&connection_id);

        if removed.is_some() {
            tracing::debug!(connection_id = %connection_id, "Session removed");
        }

        removed
    }

    /// Compute the occupants of a room: the sorted, deduplicated set of
    /// display names whose session currently references it.
    ///
    /// A pure read over session state; an unknown or empty room yields an
    /// empty list, never an error.
    pub fn occupants(&self, room: &RoomId) -> Vec<String> {
        let sessions = self.sessions.read();

        let names: BTreeSet<&str> = sessions
            .values()
            .filter(|s| s.is_in(room))
            .map(|s| s.display_name.as_str())
            .collect();

        names.into_iter().map(String::from).collect()
    }

    /// Resolve a display name to a connection.
    ///
    /// When several sessions claim the same name, the earliest-registered
    /// one wins, making "first match" deterministic.
    pub fn resolve_name(&self, display_name: &str) -> Option<ConnectionId> {
        self.sessions
            .read()
            .iter()
            .filter(|(_, s)| s.display_name == display_name)
            .min_by_key(|(_, s)| s.seq)
            .map(|(id, _)| *id)
    }

    /// Number of registered sessions
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.sessions.read().len())
            .finish()
    }
}
