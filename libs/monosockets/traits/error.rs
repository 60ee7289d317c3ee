use thiserror::Error;

/// Reasons an inbound frame is not a recognized envelope
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload is not well-formed JSON
    #[error("payload is not JSON: {0}")]
    NotJson(String),

    /// Well-formed JSON without a string `c` discriminator (including non-objects)
    #[error("envelope has no command discriminator")]
    MissingCommand,
}

/// Main error type for monosockets
#[derive(Error, Debug)]
pub enum MonoSocketError {
    /// Widget locator could not be decomposed into scheme and required query parameters
    #[error("Malformed widget locator: {0}")]
    MalformedLocator(String),

    /// Inbound frame could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Outbound command could not be serialized
    #[error("Encode error: {0}")]
    Encode(String),

    /// Sending a frame over the transport failed
    #[error("Transport send failed: {0}")]
    TransportSend(String),

    /// WebSocket handshake or read error
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Connection closed unexpectedly
    #[error("Connection closed: {0}")]
    ConnectionClosed(String),

    /// Operation not permitted in the current session state
    #[error("Invalid session state: {0}")]
    InvalidState(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for monosockets operations
pub type Result<T> = std::result::Result<T, MonoSocketError>;
