//! Room identifier and the configured room catalog

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a named broadcast group.
///
/// Rooms are not stored entities: a room "exists" whenever at least one
/// session references it, and occupant lists are always derived from
/// session state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Create a room identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the room name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoomId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for RoomId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Externally-configured catalog of named rooms.
///
/// An empty catalog places no restriction on joinable rooms; a non-empty
/// catalog restricts joins to the listed names.
#[derive(Debug, Clone, Default)]
pub struct RoomCatalog {
    rooms: Vec<RoomId>,
}

impl RoomCatalog {
    /// Create a catalog from a list of room names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rooms: names.into_iter().map(|n| RoomId::new(n)).collect(),
        }
    }

    /// Create an unrestricted catalog
    #[must_use]
    pub fn open() -> Self {
        Self::default()
    }

    /// Check whether a room may be joined under this catalog
    #[must_use]
    pub fn allows(&self, room: &RoomId) -> bool {
        self.rooms.is_empty() || self.rooms.contains(room)
    }

    /// List the configured room names
    #[must_use]
    pub fn rooms(&self) -> &[RoomId] {
        &self.rooms
    }

    /// Check whether the catalog restricts room names
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.rooms.is_empty()
    }
}
