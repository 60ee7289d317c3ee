use crate::traits::*;
use std::sync::Arc;
use std::time::Duration;

/// Everything a [`Session`](crate::core::Session) needs, assembled by the builder
pub struct SessionConfig {
    /// Widget locator, parsed lazily on open
    pub(crate) locator: String,

    /// Endpoint the transport connects to
    pub(crate) endpoint: String,

    /// Handshake headers, protocol header already merged in
    pub(crate) headers: Headers,

    /// Caller hooks, invoked after core handling
    pub(crate) hooks: SessionHooks,

    /// Interval between keepalive pings
    pub(crate) ping_interval: Duration,

    pub(crate) transport: Arc<dyn Transport>,
}

impl SessionConfig {
    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn ping_interval(&self) -> Duration {
        self.ping_interval
    }

    /// A ping is considered lost after this long without acknowledgement
    pub fn pong_timeout(&self) -> Duration {
        self.ping_interval * 3
    }
}
