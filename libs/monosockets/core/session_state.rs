//! Lock-free session state and traffic counters
//!
//! ```text
//! Idle ─> Connecting ─> Subscribing ─> Active ─> Closing ─> Closed
//! ```
//!
//! The receive loop is the only writer of the state; the keepalive task and
//! callers only read it.

use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

/// Lifecycle state of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SessionState {
    /// Constructed, no network activity yet
    Idle = 0,
    /// Transport handshake in progress
    Connecting = 1,
    /// Transport open; subscribe being issued
    Subscribing = 2,
    /// Subscribed; keepalive running
    Active = 3,
    /// Close initiated locally or remotely
    Closing = 4,
    /// Terminal
    Closed = 5,
}

impl SessionState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => SessionState::Idle,
            1 => SessionState::Connecting,
            2 => SessionState::Subscribing,
            3 => SessionState::Active,
            4 => SessionState::Closing,
            _ => SessionState::Closed,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Connecting => "connecting",
            SessionState::Subscribing => "subscribing",
            SessionState::Active => "active",
            SessionState::Closing => "closing",
            SessionState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Atomic wrapper around [`SessionState`]
pub struct AtomicSessionState {
    inner: AtomicU8,
}

impl AtomicSessionState {
    pub fn new(state: SessionState) -> Self {
        Self {
            inner: AtomicU8::new(state as u8),
        }
    }

    #[inline]
    pub fn get(&self) -> SessionState {
        SessionState::from_u8(self.inner.load(Ordering::Acquire))
    }

    #[inline]
    pub fn set(&self, state: SessionState) {
        self.inner.store(state as u8, Ordering::Release);
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.get() == SessionState::Active
    }

    /// Closing or closed
    #[inline]
    pub fn is_closing(&self) -> bool {
        matches!(self.get(), SessionState::Closing | SessionState::Closed)
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.get() == SessionState::Closed
    }
}

impl Default for AtomicSessionState {
    fn default() -> Self {
        Self::new(SessionState::Idle)
    }
}

/// Frame counters shared by the receive loop and the keepalive task
#[derive(Default)]
pub struct AtomicMetrics {
    sent: AtomicU64,
    received: AtomicU64,
    pings_sent: AtomicU64,
    pongs_received: AtomicU64,
}

impl AtomicMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn increment_sent(&self) {
        self.sent.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn increment_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn increment_pings(&self) {
        self.pings_sent.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn increment_pongs(&self) {
        self.pongs_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn messages_sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }

    pub fn messages_received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }

    pub fn pings_sent(&self) -> u64 {
        self.pings_sent.load(Ordering::Relaxed)
    }

    pub fn pongs_received(&self) -> u64 {
        self.pongs_received.load(Ordering::Relaxed)
    }
}

/// Point-in-time view of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metrics {
    pub messages_sent: u64,
    pub messages_received: u64,
    pub pings_sent: u64,
    pub pongs_received: u64,
    pub state: SessionState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trip_through_atomic() {
        let state = AtomicSessionState::default();
        assert_eq!(state.get(), SessionState::Idle);

        for next in [
            SessionState::Connecting,
            SessionState::Subscribing,
            SessionState::Active,
            SessionState::Closing,
            SessionState::Closed,
        ] {
            state.set(next);
            assert_eq!(state.get(), next);
        }
        assert!(state.is_closed());
        assert!(state.is_closing());
    }

    #[test]
    fn test_metrics_counters() {
        let metrics = AtomicMetrics::new();
        metrics.increment_sent();
        metrics.increment_sent();
        metrics.increment_received();
        metrics.increment_pings();

        assert_eq!(metrics.messages_sent(), 2);
        assert_eq!(metrics.messages_received(), 1);
        assert_eq!(metrics.pings_sent(), 1);
        assert_eq!(metrics.pongs_received(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(SessionState::Active.to_string(), "active");
    }
}
