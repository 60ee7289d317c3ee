//! Session lifecycle manager
//!
//! Binds transport events to the widget channel protocol:
//!
//! ```text
//! open ──> resolve identity ──> send subscribe ──> start keepalive ──> caller on_open
//! message ──> decode ──> pong? ──> log ack/warning ──> caller on_message(raw)
//! error ──> log ──> caller on_error
//! close ──> log ──> stop keepalive (joined) ──> caller on_close
//! ```
//!
//! Core handling always runs first and never propagates an error back into
//! the receive loop; caller hooks are chained afterwards.

use crate::core::builder::{states::NoLocator, SessionBuilder};
use crate::core::codec::{self, Command, InboundFrame, PongAck};
use crate::core::config::SessionConfig;
use crate::core::keepalive::Keepalive;
use crate::core::locator::WidgetIdentity;
use crate::core::outbound::CommandSender;
use crate::core::pong_tracker::PongTracker;
use crate::core::session_state::{AtomicMetrics, AtomicSessionState, Metrics, SessionState};
use crate::traits::*;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// What `handle_pong` made of an acknowledgement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PongOutcome {
    Acknowledged,
    Rejected { status: i64 },
}

/// One widget channel session
pub struct Session {
    config: SessionConfig,
    identity: Mutex<Option<WidgetIdentity>>,
    state: Arc<AtomicSessionState>,
    metrics: Arc<AtomicMetrics>,
    tracker: Arc<PongTracker>,
    sender: CommandSender,
    keepalive: Keepalive,
}

impl Session {
    pub fn builder() -> SessionBuilder<NoLocator> {
        SessionBuilder::new()
    }

    pub(crate) fn new(config: SessionConfig) -> Self {
        let metrics = Arc::new(AtomicMetrics::new());
        let state = Arc::new(AtomicSessionState::default());
        let tracker = Arc::new(PongTracker::new(config.pong_timeout()));
        let sender = CommandSender::new(
            Arc::clone(&config.transport),
            Arc::clone(&metrics),
            Arc::clone(&state),
        );
        let keepalive = Keepalive::new(config.ping_interval, sender.clone(), Arc::clone(&tracker));

        Self {
            config,
            identity: Mutex::new(None),
            state,
            metrics,
            tracker,
            sender,
            keepalive,
        }
    }

    /// Connect and run the receive loop until the connection closes
    ///
    /// Returns an error only when the transport could not be opened. Once
    /// open, every failure is reported through logs and the caller hooks.
    pub async fn start(&self) -> Result<()> {
        self.state.set(SessionState::Connecting);
        info!("Connecting to {}", self.config.endpoint);

        if let Err(e) = self
            .config
            .transport
            .open(&self.config.endpoint, &self.config.headers)
            .await
        {
            let reason = e.to_string();
            self.on_error(&e);
            self.on_close(None, &reason).await;
            return Err(e);
        }

        self.on_open().await;

        loop {
            match self.config.transport.recv().await {
                TransportEvent::Message(message) => self.on_message(&message),
                TransportEvent::Error(e) => {
                    self.on_error(&e);
                    self.state.set(SessionState::Closing);
                    if let Err(close_err) = self.config.transport.close().await {
                        debug!("Close after read error failed: {}", close_err);
                    }
                    self.on_close(None, &e.to_string()).await;
                    break;
                }
                TransportEvent::Closed { code, reason } => {
                    self.on_close(code, &reason).await;
                    break;
                }
            }
        }

        Ok(())
    }

    /// Resolve the widget identity, parsing the locator at most once
    ///
    /// A failed parse is not cached.
    fn resolve_identity(&self) -> Result<WidgetIdentity> {
        let mut cached = self.identity.lock();
        if let Some(identity) = cached.as_ref() {
            return Ok(identity.clone());
        }

        let identity = WidgetIdentity::parse(&self.config.locator)?;
        debug!("Parsed widget data: {:?}", identity);
        *cached = Some(identity.clone());
        Ok(identity)
    }

    /// Transport open: subscribe, start the keepalive, then the caller hook
    pub async fn on_open(&self) {
        info!("WebSocket connection opened");
        self.state.set(SessionState::Subscribing);
        self.tracker.reset();

        match self.resolve_identity() {
            Ok(identity) => match self.send_command(&Command::subscribe(&identity)).await {
                Ok(()) => info!(
                    widget_id = %identity.widget_id,
                    short_name = %identity.short_name,
                    "Subscribe command sent"
                ),
                Err(e) => error!("Failed to send subscribe command: {}", e),
            },
            Err(e) => error!("Error accessing widget data: {}", e),
        }

        self.keepalive.start();
        self.state.set(SessionState::Active);

        if let Some(hook) = &self.config.hooks.on_open {
            hook();
        }
    }

    /// Inbound frame: route pongs, log anything undecodable, then the caller hook
    pub fn on_message(&self, message: &WsMessage) {
        self.metrics.increment_received();
        match message.as_text() {
            Some(text) => debug!("Received message: {}", text),
            None => debug!("Received binary message ({} bytes)", message.as_bytes().len()),
        }

        match codec::decode(message.as_bytes()) {
            Ok(envelope) => match InboundFrame::from(envelope) {
                InboundFrame::Pong(ack) => {
                    self.handle_pong(&ack);
                }
                InboundFrame::Other(envelope) => {
                    debug!(command = %envelope.command, "Envelope left to caller");
                }
            },
            Err(DecodeError::NotJson(e)) => warn!("Received non-JSON message: {}", e),
            Err(e) => warn!("Error processing message: {}", e),
        }

        if let Some(hook) = &self.config.hooks.on_message {
            hook(message);
        }
    }

    /// Log a pong acknowledgement; never changes the session state
    pub fn handle_pong(&self, ack: &PongAck) -> PongOutcome {
        if ack.is_ok() {
            self.tracker.record_ack();
            self.metrics.increment_pongs();
            debug!(
                conn_trace = ?ack.conn_trace,
                trace_id = ?ack.trace_id,
                "Ping acknowledged"
            );
            PongOutcome::Acknowledged
        } else {
            warn!(
                "Ping failed with status: {}, traceId: {}",
                ack.status,
                ack.trace_id.as_deref().unwrap_or("-")
            );
            PongOutcome::Rejected { status: ack.status }
        }
    }

    /// Transport error: log and forward; reconnecting is the caller's business
    pub fn on_error(&self, err: &MonoSocketError) {
        error!("WebSocket error: {}", err);
        if let Some(hook) = &self.config.hooks.on_error {
            hook(err);
        }
    }

    /// Transport closed: join the keepalive before the caller hook runs
    pub async fn on_close(&self, code: Option<u16>, reason: &str) {
        info!("WebSocket closed with code: {:?}, message: {}", code, reason);
        self.state.set(SessionState::Closing);
        self.keepalive.stop().await;
        self.state.set(SessionState::Closed);

        if let Some(hook) = &self.config.hooks.on_close {
            hook(code, reason);
        }
    }

    /// Initiate a local close; the transport's close event finishes teardown
    pub async fn close(&self) -> Result<()> {
        if self.state.is_closing() {
            return Ok(());
        }
        info!("Closing session");
        self.state.set(SessionState::Closing);
        self.config.transport.close().await
    }

    /// Send a command unless the session is closed
    pub async fn send_command(&self, command: &Command) -> Result<()> {
        self.sender.send_command(command).await
    }

    /// Start the keepalive; a closed session stays silent
    pub fn start_ping(&self) {
        if self.state.is_closed() {
            warn!("Not starting ping task: session is closed");
            return;
        }
        self.keepalive.start();
    }

    /// Stop the keepalive and wait for its task to exit
    pub async fn stop_ping(&self) {
        self.keepalive.stop().await;
    }

    pub fn is_pinging(&self) -> bool {
        self.keepalive.is_running()
    }

    /// The widget identity, once the open handler has resolved it
    pub fn identity(&self) -> Option<WidgetIdentity> {
        self.identity.lock().clone()
    }

    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    /// False when a ping has gone unacknowledged for 3 intervals
    pub fn is_healthy(&self) -> bool {
        self.tracker.is_healthy()
    }

    /// Time since the server last acknowledged a ping
    pub fn time_since_last_ack(&self) -> Option<Duration> {
        self.tracker.time_since_last_ack()
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            messages_sent: self.metrics.messages_sent(),
            messages_received: self.metrics.messages_received(),
            pings_sent: self.metrics.pings_sent(),
            pongs_received: self.metrics.pongs_received(),
            state: self.state.get(),
        }
    }

    pub fn locator(&self) -> &str {
        self.config.locator()
    }

    pub fn endpoint(&self) -> &str {
        self.config.endpoint()
    }

    pub fn headers(&self) -> &Headers {
        self.config.headers()
    }

    pub fn ping_interval(&self) -> Duration {
        self.config.ping_interval()
    }
}
