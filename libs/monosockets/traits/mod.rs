//! # MonoSockets Traits
//!
//! Seams and shared types for the widget channel client:
//!
//! - **Transport**: open/send/recv/close over some bidirectional channel
//! - **SessionHooks**: optional caller callbacks chained after core handling
//! - **WsMessage**: a text or binary data frame
//! - **Headers**: handshake headers and the fixed connection parameters
//! - **MonoSocketError**: the crate error taxonomy

pub mod error;
pub mod headers;
pub mod hooks;
pub mod message;
pub mod transport;

pub use error::{DecodeError, MonoSocketError, Result};
pub use headers::{
    merge_protocol_header, Headers, MONOBANK_WS_URL, SEC_WEBSOCKET_PROTOCOL,
    SEC_WEBSOCKET_PROTOCOL_HEADER,
};
pub use hooks::{CloseHook, ErrorHook, MessageHook, OpenHook, SessionHooks};
pub use message::WsMessage;
pub use transport::{Transport, TransportEvent};
