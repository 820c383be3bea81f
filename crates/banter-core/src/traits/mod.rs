//! Ports - interfaces to external collaborators
//!
//! The domain layer defines what it needs from the history store, the
//! delivery channel, and the authentication service; the infrastructure
//! layers provide the implementations.

mod auth;
mod delivery;
mod history;

pub use auth::{AccountCreation, AuthService, CredentialCheck, VerifiedUser};
pub use delivery::DeliveryChannel;
pub use history::{HistoryStore, StoreResult};
