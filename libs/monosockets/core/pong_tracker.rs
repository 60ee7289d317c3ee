//! Pong acknowledgement tracker
//!
//! Records when the keepalive last sent a ping and when the server last
//! acknowledged one. A session is reported unhealthy when a ping has gone
//! unacknowledged for longer than the timeout. Purely observational: nothing
//! reconnects or changes state because of it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// Tracks ping/acknowledgement timing for one session
///
/// Timestamps are stored as milliseconds since `epoch`, offset by one so that
/// zero can mean "never".
pub struct PongTracker {
    epoch: Instant,
    last_ping_sent_ms: AtomicU64,
    last_ack_ms: AtomicU64,
    timeout: Duration,
}

impl PongTracker {
    /// `timeout` should be a few ping intervals (the session uses 3x)
    pub fn new(timeout: Duration) -> Self {
        Self {
            epoch: Instant::now(),
            last_ping_sent_ms: AtomicU64::new(0),
            last_ack_ms: AtomicU64::new(0),
            timeout,
        }
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64 + 1
    }

    pub fn record_ping_sent(&self) {
        self.last_ping_sent_ms.store(self.now_ms(), Ordering::Release);
    }

    /// Record a successful (status 200) acknowledgement
    pub fn record_ack(&self) {
        self.last_ack_ms.store(self.now_ms(), Ordering::Release);
    }

    /// False only when a ping is outstanding past the timeout
    pub fn is_healthy(&self) -> bool {
        let ping_ms = self.last_ping_sent_ms.load(Ordering::Acquire);
        let ack_ms = self.last_ack_ms.load(Ordering::Acquire);

        if ping_ms == 0 || ack_ms >= ping_ms {
            return true;
        }

        self.now_ms().saturating_sub(ping_ms) < self.timeout.as_millis() as u64
    }

    /// Time since the last acknowledgement, `None` if there never was one
    pub fn time_since_last_ack(&self) -> Option<Duration> {
        match self.last_ack_ms.load(Ordering::Acquire) {
            0 => None,
            ack_ms => Some(Duration::from_millis(self.now_ms().saturating_sub(ack_ms))),
        }
    }

    pub fn reset(&self) {
        self.last_ping_sent_ms.store(0, Ordering::Release);
        self.last_ack_ms.store(0, Ordering::Release);
    }
}
