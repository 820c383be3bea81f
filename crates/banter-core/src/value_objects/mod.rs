//! Value objects - immutable domain identifiers

mod connection_id;
mod room;

pub use connection_id::ConnectionId;
pub use room::{RoomCatalog, RoomId};
