//! Session entity - live presence record for one connection

use crate::value_objects::RoomId;

/// Live presence record for one connection.
///
/// The display name is set exactly once at registration and is immutable
/// for the life of the session. `current_room` is `None` until the first
/// join; at most one room is held at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub display_name: String,
    pub current_room: Option<RoomId>,
    /// Server-issued monotonic registration number. Makes "first match"
    /// display-name resolution deterministic when names collide.
    pub seq: u64,
}

impl Session {
    /// Create a new Session with no room
    pub fn new(display_name: impl Into<String>, seq: u64) -> Self {
        Self {
            display_name: display_name.into(),
            current_room: None,
            seq,
        }
    }

    /// Check whether the session currently holds a room
    #[inline]
    pub fn in_room(&self) -> bool {
        self.current_room.is_some()
    }

    /// Check whether the session is in the given room
    #[inline]
    pub fn is_in(&self, room: &RoomId) -> bool {
        self.current_room.as_ref() == Some(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_has_no_room() {
        let session = Session::new("alice", 1);
        assert_eq!(session.display_name, "alice");
        assert!(!session.in_room());
        assert!(!session.is_in(&RoomId::new("sports")));
    }

    #[test]
    fn test_is_in() {
        let mut session = Session::new("alice", 1);
        session.current_room = Some(RoomId::new("sports"));
        assert!(session.in_room());
        assert!(session.is_in(&RoomId::new("sports")));
        assert!(!session.is_in(&RoomId::new("music")));
    }
}
