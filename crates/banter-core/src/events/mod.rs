//! Outbound event vocabulary

mod outbound;

pub use outbound::{NoticeAction, OutboundEvent};
