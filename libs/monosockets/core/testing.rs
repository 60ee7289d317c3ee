//! In-memory transport for unit tests

use crate::traits::{Headers, MonoSocketError, Result, Transport, TransportEvent, WsMessage};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;

pub(crate) struct FakeTransport {
    sent: Mutex<Vec<String>>,
    opened_with: Mutex<Option<(String, Headers)>>,
    fail_sends: AtomicBool,
    fail_open: AtomicBool,
    closed: AtomicBool,
    inbound_tx: mpsc::UnboundedSender<TransportEvent>,
    inbound_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<TransportEvent>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        Self {
            sent: Mutex::new(Vec::new()),
            opened_with: Mutex::new(None),
            fail_sends: AtomicBool::new(false),
            fail_open: AtomicBool::new(false),
            closed: AtomicBool::new(false),
            inbound_tx,
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
        }
    }

    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::Release);
    }

    pub fn fail_open(&self, fail: bool) {
        self.fail_open.store(fail, Ordering::Release);
    }

    /// Queue an inbound event for `recv`
    pub fn push(&self, event: TransportEvent) {
        let _ = self.inbound_tx.send(event);
    }

    pub fn push_text(&self, text: &str) {
        self.push(TransportEvent::Message(WsMessage::from(text)));
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn opened_with(&self) -> Option<(String, Headers)> {
        self.opened_with.lock().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn open(&self, url: &str, headers: &Headers) -> Result<()> {
        if self.fail_open.load(Ordering::Acquire) {
            return Err(MonoSocketError::WebSocket("connection refused".to_string()));
        }
        *self.opened_with.lock() = Some((url.to_string(), headers.clone()));
        Ok(())
    }

    async fn send(&self, text: String) -> Result<()> {
        if self.fail_sends.load(Ordering::Acquire) {
            return Err(MonoSocketError::TransportSend("socket is closed".to_string()));
        }
        self.sent.lock().push(text);
        Ok(())
    }

    async fn recv(&self) -> TransportEvent {
        match self.inbound_rx.lock().await.recv().await {
            Some(event) => event,
            None => TransportEvent::Closed {
                code: None,
                reason: String::new(),
            },
        }
    }

    /// Behaves like a peer that echoes the close handshake
    async fn close(&self) -> Result<()> {
        if !self.closed.swap(true, Ordering::AcqRel) {
            self.push(TransportEvent::Closed {
                code: Some(1000),
                reason: "client close".to_string(),
            });
        }
        Ok(())
    }
}
