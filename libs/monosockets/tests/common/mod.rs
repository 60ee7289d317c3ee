//! Common test utilities for MonoSockets integration tests
//!
//! Provides a mock widget channel server that speaks just enough of the
//! protocol: it records client frames, acknowledges pings and pushes a
//! widget update after a subscribe.

#![allow(dead_code)]

use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{watch, Notify};
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;

/// Frame the server pushes after a subscribe
pub const WIDGET_UPDATE: &str = r#"{"c":"update-widget","data":{"jarAmount":12500}}"#;

#[derive(Default)]
struct Shared {
    frames: Mutex<Vec<String>>,
    protocol_headers: Mutex<Vec<String>>,
    pings: AtomicUsize,
    pong_status: AtomicI64,
}

/// A mock widget channel server
pub struct MockWidgetServer {
    pub addr: SocketAddr,
    shared: Arc<Shared>,
    close_clients: watch::Sender<bool>,
    shutdown: Arc<Notify>,
}

impl MockWidgetServer {
    /// Start a server that acknowledges pings with status 200
    pub async fn start() -> Self {
        Self::start_with_pong_status(200).await
    }

    pub async fn start_with_pong_status(status: i64) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shared = Arc::new(Shared::default());
        shared.pong_status.store(status, Ordering::Release);
        let (close_clients, close_rx) = watch::channel(false);
        let shutdown = Arc::new(Notify::new());

        {
            let shared = Arc::clone(&shared);
            let close_rx = close_rx.clone();
            let shutdown = Arc::clone(&shutdown);
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        result = listener.accept() => {
                            match result {
                                Ok((stream, _)) => {
                                    let shared = Arc::clone(&shared);
                                    let close_rx = close_rx.clone();
                                    tokio::spawn(async move {
                                        Self::handle_connection(stream, shared, close_rx).await;
                                    });
                                }
                                Err(e) => {
                                    eprintln!("Accept error: {}", e);
                                    break;
                                }
                            }
                        }
                        _ = shutdown.notified() => break,
                    }
                }
            });
        }

        Self {
            addr,
            shared,
            close_clients,
            shutdown,
        }
    }

    async fn handle_connection(
        stream: tokio::net::TcpStream,
        shared: Arc<Shared>,
        mut close_rx: watch::Receiver<bool>,
    ) {
        let handshake_shared = Arc::clone(&shared);
        let callback = move |request: &Request, mut response: Response| {
            if let Some(value) = request.headers().get("Sec-WebSocket-Protocol") {
                handshake_shared
                    .protocol_headers
                    .lock()
                    .push(value.to_str().unwrap_or_default().to_string());
            }
            // The client offers "mono, <token>"; pick the first one
            response
                .headers_mut()
                .insert("Sec-WebSocket-Protocol", HeaderValue::from_static("mono"));
            Ok::<Response, ErrorResponse>(response)
        };

        let ws_stream = match tokio_tungstenite::accept_hdr_async(stream, callback).await {
            Ok(ws) => ws,
            Err(e) => {
                eprintln!("WebSocket handshake failed: {}", e);
                return;
            }
        };

        let (mut write, mut read) = ws_stream.split();

        loop {
            tokio::select! {
                msg = read.next() => {
                    let text = match msg {
                        Some(Ok(Message::Text(text))) => text,
                        Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                        Some(Ok(_)) => continue,
                    };
                    shared.frames.lock().push(text.clone());

                    let reply = if text.contains(r#""c":"ping""#) {
                        let n = shared.pings.fetch_add(1, Ordering::AcqRel) + 1;
                        Some(format!(
                            r#"{{"c":"ping","s":{},"traceId":"trace-{}","data":{{"connTrace":"conn-{}"}}}}"#,
                            shared.pong_status.load(Ordering::Acquire),
                            n,
                            n
                        ))
                    } else if text.contains(r#""c":"subscribe""#) {
                        Some(WIDGET_UPDATE.to_string())
                    } else {
                        None
                    };

                    if let Some(reply) = reply {
                        if write.send(Message::Text(reply)).await.is_err() {
                            break;
                        }
                    }
                }
                changed = close_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let frame = CloseFrame {
                        code: CloseCode::Normal,
                        reason: "server shutdown".into(),
                    };
                    let _ = write.send(Message::Close(Some(frame))).await;
                }
            }
        }
    }

    /// Endpoint for `SessionBuilder::endpoint`
    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Text frames received from clients, in arrival order
    pub fn frames(&self) -> Vec<String> {
        self.shared.frames.lock().clone()
    }

    pub fn ping_count(&self) -> usize {
        self.shared.pings.load(Ordering::Acquire)
    }

    pub fn protocol_headers(&self) -> Vec<String> {
        self.shared.protocol_headers.lock().clone()
    }

    /// Send a close frame to every connected client
    pub fn close_clients(&self) {
        let _ = self.close_clients.send(true);
    }

    pub fn shutdown(&self) {
        self.shutdown.notify_waiters();
    }
}

impl Drop for MockWidgetServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Poll `condition` every 10ms until it holds or `timeout` elapses
pub async fn wait_until(timeout: Duration, condition: impl Fn() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
