pub mod states;

use crate::core::config::SessionConfig;
use crate::core::keepalive::DEFAULT_PING_INTERVAL;
use crate::core::session::Session;
use crate::core::ws_transport::WsTransport;
use crate::traits::*;
use states::*;
use std::sync::Arc;
use std::time::Duration;

/// Type-state builder for [`Session`]
///
/// Only the locator is required. Everything else has a default: the
/// Monobank endpoint, no extra headers, no hooks, a 5 second ping interval
/// and a [`WsTransport`].
pub struct SessionBuilder<L>
where
    L: LocatorState,
{
    _state: TypeState<L>,
    locator: Option<String>,
    endpoint: String,
    headers: Headers,
    hooks: SessionHooks,
    ping_interval: Duration,
    transport: Option<Arc<dyn Transport>>,
}

impl SessionBuilder<NoLocator> {
    pub fn new() -> Self {
        Self {
            _state: TypeState::new(),
            locator: None,
            endpoint: MONOBANK_WS_URL.to_string(),
            headers: Headers::new(),
            hooks: SessionHooks::default(),
            ping_interval: DEFAULT_PING_INTERVAL,
            transport: None,
        }
    }

    /// Widget locator, e.g. `https://send.monobank.ua/...?token=..&widgetId=..&shortName=..`
    pub fn locator(self, locator: impl Into<String>) -> SessionBuilder<HasLocator> {
        SessionBuilder {
            _state: TypeState::new(),
            locator: Some(locator.into()),
            endpoint: self.endpoint,
            headers: self.headers,
            hooks: self.hooks,
            ping_interval: self.ping_interval,
            transport: self.transport,
        }
    }
}

impl Default for SessionBuilder<NoLocator> {
    fn default() -> Self {
        Self::new()
    }
}

// Optional configuration, available in any state
impl<L> SessionBuilder<L>
where
    L: LocatorState,
{
    /// Override the endpoint (local servers, staging)
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Add one handshake header; the protocol header cannot be overridden
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn hooks(mut self, hooks: SessionHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn on_open(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.hooks = self.hooks.on_open(hook);
        self
    }

    pub fn on_message(mut self, hook: impl Fn(&WsMessage) + Send + Sync + 'static) -> Self {
        self.hooks = self.hooks.on_message(hook);
        self
    }

    pub fn on_error(mut self, hook: impl Fn(&MonoSocketError) + Send + Sync + 'static) -> Self {
        self.hooks = self.hooks.on_error(hook);
        self
    }

    pub fn on_close(mut self, hook: impl Fn(Option<u16>, &str) + Send + Sync + 'static) -> Self {
        self.hooks = self.hooks.on_close(hook);
        self
    }

    pub fn ping_interval(mut self, interval: Duration) -> Self {
        self.ping_interval = interval;
        self
    }

    /// Replace the default WebSocket transport
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }
}

// Build - only available once the locator is set
impl SessionBuilder<HasLocator> {
    pub fn build(self) -> Result<Session> {
        let Some(locator) = self.locator else {
            return Err(MonoSocketError::Configuration("locator must be set".to_string()));
        };

        if self.ping_interval.is_zero() {
            return Err(MonoSocketError::Configuration(
                "ping interval must be greater than zero".to_string(),
            ));
        }

        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(WsTransport::new()) as Arc<dyn Transport>);

        Ok(Session::new(SessionConfig {
            locator,
            endpoint: self.endpoint,
            headers: merge_protocol_header(self.headers),
            hooks: self.hooks,
            ping_interval: self.ping_interval,
            transport,
        }))
    }
}
