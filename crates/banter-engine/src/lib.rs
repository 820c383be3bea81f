//! # banter-engine
//!
//! The presence & message-routing engine: the in-memory registry of
//! connected sessions, room-membership transitions, and the fanout logic
//! that turns one inbound event into the correct set of outbound
//! notifications.

pub mod registry;
pub mod router;

pub use registry::SessionRegistry;
pub use router::{ClientEvent, IgnoreReason, RouteOutcome, Router};
