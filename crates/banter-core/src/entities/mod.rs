//! Domain entities

mod message;
mod session;

pub use message::{GroupMessage, NewGroupMessage, NewPrivateMessage, PrivateMessage};
pub use session::Session;
