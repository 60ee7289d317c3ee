//! Caller-supplied event hooks
//!
//! Every hook is optional and runs *after* the session's own handling of the
//! same event. Hooks are plain synchronous closures invoked on the receive
//! loop, so they should hand heavy work off to another task or thread.

use crate::traits::error::MonoSocketError;
use crate::traits::message::WsMessage;
use std::fmt;
use std::sync::Arc;

pub type OpenHook = Arc<dyn Fn() + Send + Sync>;
pub type MessageHook = Arc<dyn Fn(&WsMessage) + Send + Sync>;
pub type ErrorHook = Arc<dyn Fn(&MonoSocketError) + Send + Sync>;
pub type CloseHook = Arc<dyn Fn(Option<u16>, &str) + Send + Sync>;

/// The four optional caller hooks
#[derive(Clone, Default)]
pub struct SessionHooks {
    pub on_open: Option<OpenHook>,
    pub on_message: Option<MessageHook>,
    pub on_error: Option<ErrorHook>,
    pub on_close: Option<CloseHook>,
}

impl SessionHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_open(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_open = Some(Arc::new(hook));
        self
    }

    /// Receives the raw frame exactly as the transport delivered it
    pub fn on_message(mut self, hook: impl Fn(&WsMessage) + Send + Sync + 'static) -> Self {
        self.on_message = Some(Arc::new(hook));
        self
    }

    pub fn on_error(mut self, hook: impl Fn(&MonoSocketError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Receives the close code (if the peer sent one) and the reason text
    pub fn on_close(mut self, hook: impl Fn(Option<u16>, &str) + Send + Sync + 'static) -> Self {
        self.on_close = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for SessionHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHooks")
            .field("on_open", &self.on_open.is_some())
            .field("on_message", &self.on_message.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}
