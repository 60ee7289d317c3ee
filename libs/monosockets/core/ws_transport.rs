//! tokio-tungstenite implementation of [`Transport`]

use crate::traits::{Headers, MonoSocketError, Result, Transport, TransportEvent, WsMessage};
use async_trait::async_trait;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::{http, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket transport
///
/// The write half sits behind its own async mutex, so the receive loop and
/// the keepalive task can both send without interleaving frames.
#[derive(Default)]
pub struct WsTransport {
    sink: Mutex<Option<SplitSink<WsStream, Message>>>,
    source: Mutex<Option<SplitStream<WsStream>>>,
}

impl WsTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn open(&self, url: &str, headers: &Headers) -> Result<()> {
        let mut request = url
            .into_client_request()
            .map_err(|e| MonoSocketError::WebSocket(format!("Failed to create request: {}", e)))?;

        for (key, value) in headers {
            match (
                key.parse::<http::header::HeaderName>(),
                value.parse::<http::header::HeaderValue>(),
            ) {
                (Ok(name), Ok(value)) => {
                    request.headers_mut().insert(name, value);
                }
                (Err(_), _) => warn!("Invalid header name: {}", key),
                (_, Err(_)) => warn!("Invalid header value for key '{}'", key),
            }
        }

        let (ws_stream, _) = connect_async(request)
            .await
            .map_err(|e| MonoSocketError::WebSocket(e.to_string()))?;
        info!("Connected to {}", url);

        let (write, read) = ws_stream.split();
        *self.sink.lock().await = Some(write);
        *self.source.lock().await = Some(read);
        Ok(())
    }

    async fn send(&self, text: String) -> Result<()> {
        let mut sink = self.sink.lock().await;
        let Some(write) = sink.as_mut() else {
            return Err(MonoSocketError::TransportSend("not connected".to_string()));
        };
        write
            .send(Message::Text(text))
            .await
            .map_err(|e| MonoSocketError::TransportSend(e.to_string()))
    }

    async fn recv(&self) -> TransportEvent {
        let mut source = self.source.lock().await;
        let Some(read) = source.as_mut() else {
            return TransportEvent::Closed {
                code: None,
                reason: "not connected".to_string(),
            };
        };

        loop {
            match read.next().await {
                Some(Ok(Message::Close(frame))) => {
                    let (code, reason) = frame
                        .map(|f| (Some(u16::from(f.code)), f.reason.into_owned()))
                        .unwrap_or((None, String::new()));
                    return TransportEvent::Closed { code, reason };
                }
                Some(Ok(msg)) => {
                    if let Some(ws_msg) = WsMessage::from_tungstenite(msg) {
                        return TransportEvent::Message(ws_msg);
                    }
                    // ping/pong control frames are answered by tungstenite
                }
                Some(Err(e)) => {
                    return TransportEvent::Error(MonoSocketError::WebSocket(e.to_string()));
                }
                None => {
                    debug!("WebSocket stream ended");
                    return TransportEvent::Closed {
                        code: None,
                        reason: String::new(),
                    };
                }
            }
        }
    }

    async fn close(&self) -> Result<()> {
        let Some(mut write) = self.sink.lock().await.take() else {
            return Ok(());
        };
        write
            .close()
            .await
            .map_err(|e| MonoSocketError::ConnectionClosed(e.to_string()))
    }
}
