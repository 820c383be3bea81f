//! # banter-core
//!
//! Domain layer containing entities, value objects, the outbound event
//! vocabulary, and the ports to external collaborators (history store,
//! delivery channel, authentication service). This crate has zero
//! dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{GroupMessage, NewGroupMessage, NewPrivateMessage, PrivateMessage, Session};
pub use error::DomainError;
pub use events::{NoticeAction, OutboundEvent};
pub use traits::{
    AccountCreation, AuthService, CredentialCheck, DeliveryChannel, HistoryStore, StoreResult,
    VerifiedUser,
};
pub use value_objects::{ConnectionId, RoomCatalog, RoomId};
