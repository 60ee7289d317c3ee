//! Command envelope codec
//!
//! Wire unit in both directions:
//!
//! ```text
//! {"c": "<command>", "data": {...}}                          outbound
//! {"c": "ping", "s": 200, "traceId": "..", "data": {...}}    inbound pong acknowledgement
//! ```
//!
//! `data` is omitted entirely when a command carries no payload. Decoding is
//! best-effort: anything that is not a JSON object with a string `c` field
//! comes back as a [`DecodeError`], never a panic, and unknown commands decode
//! fine so the caller can ignore them.

use crate::core::locator::WidgetIdentity;
use crate::traits::{DecodeError, MonoSocketError, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Event path of the widget update subscription
pub const UPDATE_WIDGET_EVENT: &str = "/ext/api/web/update-widget";

pub const SUBSCRIBE_COMMAND: &str = "subscribe";
pub const PING_COMMAND: &str = "ping";

/// Status code of a successful pong acknowledgement
pub const PONG_OK_STATUS: i64 = 200;

/// A decoded envelope
#[derive(Debug, Clone, PartialEq)]
pub struct CommandEnvelope {
    pub command: String,
    pub payload: Option<Map<String, Value>>,
    pub status: Option<i64>,
    pub trace_id: Option<String>,
}

#[derive(Serialize)]
struct OutboundEnvelope<'a> {
    c: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Map<String, Value>>,
}

/// Serialize a command into its wire envelope
pub fn encode(command: &str, payload: Option<&Map<String, Value>>) -> Result<String> {
    serde_json::to_string(&OutboundEnvelope { c: command, data: payload })
        .map_err(|e| MonoSocketError::Encode(e.to_string()))
}

/// Parse raw frame bytes into an envelope
pub fn decode(raw: impl AsRef<[u8]>) -> std::result::Result<CommandEnvelope, DecodeError> {
    let value: Value =
        serde_json::from_slice(raw.as_ref()).map_err(|e| DecodeError::NotJson(e.to_string()))?;

    let Value::Object(mut object) = value else {
        return Err(DecodeError::MissingCommand);
    };

    let command = match object.remove("c") {
        Some(Value::String(c)) => c,
        _ => return Err(DecodeError::MissingCommand),
    };

    let payload = match object.remove("data") {
        Some(Value::Object(data)) => Some(data),
        _ => None,
    };

    Ok(CommandEnvelope {
        command,
        payload,
        status: object.get("s").and_then(integral_status),
        trace_id: object
            .get("traceId")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Numeric status as an integer; `200.0` counts, `200.5` does not
fn integral_status(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// Commands this client sends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Subscribe to widget updates
    Subscribe { widget_id: String, short_name: String },
    /// Keepalive probe
    Ping,
}

impl Command {
    pub fn subscribe(identity: &WidgetIdentity) -> Self {
        Command::Subscribe {
            widget_id: identity.widget_id.clone(),
            short_name: identity.short_name.clone(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Subscribe { .. } => SUBSCRIBE_COMMAND,
            Command::Ping => PING_COMMAND,
        }
    }

    fn payload(&self) -> Option<Map<String, Value>> {
        match self {
            Command::Subscribe { widget_id, short_name } => {
                let mut data = Map::new();
                data.insert("event".to_string(), json!(UPDATE_WIDGET_EVENT));
                data.insert(
                    "params".to_string(),
                    json!({ "widgetId": widget_id, "shortName": short_name }),
                );
                Some(data)
            }
            Command::Ping => None,
        }
    }

    pub fn encode(&self) -> Result<String> {
        encode(self.name(), self.payload().as_ref())
    }
}

/// A server acknowledgement of a keepalive probe
#[derive(Debug, Clone, PartialEq)]
pub struct PongAck {
    pub status: i64,
    pub trace_id: Option<String>,
    pub conn_trace: Option<Value>,
}

impl PongAck {
    pub fn is_ok(&self) -> bool {
        self.status == PONG_OK_STATUS
    }
}

/// How the session should treat a decoded envelope
#[derive(Debug, Clone, PartialEq)]
pub enum InboundFrame {
    Pong(PongAck),
    /// Anything else, including `ping` envelopes without a numeric status
    Other(CommandEnvelope),
}

impl From<CommandEnvelope> for InboundFrame {
    fn from(envelope: CommandEnvelope) -> Self {
        let is_ping = envelope.command == PING_COMMAND;
        match (is_ping, envelope.status) {
            (true, Some(status)) => InboundFrame::Pong(PongAck {
                status,
                trace_id: envelope.trace_id,
                conn_trace: envelope
                    .payload
                    .as_ref()
                    .and_then(|data| data.get("connTrace"))
                    .cloned(),
            }),
            _ => InboundFrame::Other(envelope),
        }
    }
}
