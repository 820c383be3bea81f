//! # banter-gateway
//!
//! The network surface of the coordinator: a WebSocket endpoint carrying
//! the realtime event protocol, plus a small HTTP API for accounts and
//! message history.
//!
//! The gateway owns no routing logic itself. Inbound frames are decoded
//! into engine events and handed to the `Router` from `banter-engine`; the
//! `ConnectionManager` here implements the engine's `DeliveryChannel`
//! contract over per-connection mpsc channels.

pub mod connection;
pub mod http;
pub mod protocol;
pub mod server;

pub use connection::ConnectionManager;
pub use server::{create_app, run, GatewayState};
