//! # MonoSockets
//!
//! Session client for the Monobank widget push channel.
//!
//! ## Example
//!
//! ```rust,ignore
//! use monosockets::Session;
//!
//! #[tokio::main]
//! async fn main() -> monosockets::Result<()> {
//!     let session = Session::builder()
//!         .locator("https://send.monobank.ua/widget?token=T&widgetId=W&shortName=S")
//!         .on_message(|msg| println!("widget update: {:?}", msg))
//!         .on_close(|code, reason| println!("closed: {:?} {}", code, reason))
//!         .build()?;
//!
//!     session.start().await?;
//!     session.stop_ping().await;
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod codec;
pub mod config;
pub mod keepalive;
pub mod locator;
pub mod outbound;
pub mod pong_tracker;
pub mod session;
pub mod session_state;
pub mod ws_transport;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types
pub use builder::{states, SessionBuilder};
pub use codec::{Command, CommandEnvelope, InboundFrame, PongAck};
pub use config::SessionConfig;
pub use keepalive::{Keepalive, DEFAULT_PING_INTERVAL};
pub use locator::{parse_widget_locator, WidgetIdentity};
pub use outbound::CommandSender;
pub use pong_tracker::PongTracker;
pub use session::{PongOutcome, Session};
pub use session_state::{AtomicMetrics, AtomicSessionState, Metrics, SessionState};
pub use ws_transport::WsTransport;

/// Start building a session
pub fn builder() -> SessionBuilder<states::NoLocator> {
    SessionBuilder::new()
}
