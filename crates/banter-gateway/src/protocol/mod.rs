//! Wire protocol for the WebSocket endpoint

mod frames;

pub use frames::ClientFrame;
