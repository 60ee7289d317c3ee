//! Transport seam
//!
//! The session never talks to a socket directly. It drives any type that
//! implements [`Transport`], which lets the lifecycle logic run against
//! tokio-tungstenite in production and an in-memory fake in tests.
//!
//! ```text
//! Session::start ──open()──> Transport ──handshake──> server
//!        │                      │
//!        │<──recv(): Message ───┤
//!        │<──recv(): Error ─────┤
//!        │<──recv(): Closed ────┘
//!        │
//! Keepalive task ──send()──> Transport   (sends are serialized by the transport)
//! ```

use crate::traits::error::{MonoSocketError, Result};
use crate::traits::headers::Headers;
use crate::traits::message::WsMessage;
use async_trait::async_trait;

/// Event delivered by the transport's receive side
#[derive(Debug)]
pub enum TransportEvent {
    /// A text or binary data frame
    Message(WsMessage),
    /// The read side failed; the connection is not usable afterwards
    Error(MonoSocketError),
    /// Close frame received or stream ended
    Closed { code: Option<u16>, reason: String },
}

/// Bidirectional message transport
///
/// `send` may be called concurrently from the event context and the
/// keepalive task; implementations must serialize writes. `recv` is only
/// ever called from the session's receive loop.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the connection handshake
    async fn open(&self, url: &str, headers: &Headers) -> Result<()>;

    /// Send one text frame
    async fn send(&self, text: String) -> Result<()>;

    /// Wait for the next inbound event
    async fn recv(&self) -> TransportEvent;

    /// Initiate a close; calling it on a closed transport is a no-op
    async fn close(&self) -> Result<()>;
}
