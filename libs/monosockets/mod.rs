//! # MonoSockets
//!
//! A long-lived client for the Monobank widget push channel.
//!
//! ## Features
//!
//! - **Session lifecycle**: connect, subscribe, keepalive, teardown driven by transport events
//! - **Keepalive task**: cancellable ping loop, joined before close hooks run
//! - **Command codec**: `{"c": .., "data": ..}` envelopes with best-effort decoding
//! - **Pluggable transport**: tokio-tungstenite by default, any [`Transport`] in tests
//! - **Caller hooks**: open/message/error/close callbacks chained after core handling

pub mod traits;
pub mod core;

// Re-export all traits
pub use traits::*;

// Re-export core functionality
pub use self::core::{
    builder, codec, keepalive, locator, session, session_state,
    builder::{states, SessionBuilder},
    codec::{Command, CommandEnvelope, InboundFrame, PongAck},
    keepalive::{Keepalive, DEFAULT_PING_INTERVAL},
    locator::{parse_widget_locator, WidgetIdentity},
    pong_tracker::PongTracker,
    session::{PongOutcome, Session},
    session_state::{AtomicSessionState, Metrics, SessionState},
    ws_transport::WsTransport,
};

// Convenience function
pub use self::core::builder as session_builder;
