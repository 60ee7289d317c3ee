use std::collections::HashMap;

/// HTTP headers sent with the WebSocket handshake
pub type Headers = HashMap<String, String>;

/// Monobank widget channel endpoint
pub const MONOBANK_WS_URL: &str = "wss://base.monobank.com.ua/ext/api/web/wss";

/// Header carrying the subaccount credential
pub const SEC_WEBSOCKET_PROTOCOL_HEADER: &str = "Sec-WebSocket-Protocol";

/// Subprotocol list the widget channel expects
pub const SEC_WEBSOCKET_PROTOCOL: &str = "mono, eyJxclRva2VuIjoid19jMmQwM2JlYmViYmZjYzEwMWUzNzdkNmRiNDNhMzk3NDIyMTE5NjdhZDZkZjFjMDllYjdmZGY4OGIyOGNjZTY3ODE4NmU3NDEifQ";

/// Merge caller headers with the protocol header
///
/// The protocol header always wins. Header names are case-insensitive on
/// the wire, so any caller spelling of it is dropped first.
pub fn merge_protocol_header(mut headers: Headers) -> Headers {
    headers.retain(|name, _| !name.eq_ignore_ascii_case(SEC_WEBSOCKET_PROTOCOL_HEADER));
    headers.insert(
        SEC_WEBSOCKET_PROTOCOL_HEADER.to_string(),
        SEC_WEBSOCKET_PROTOCOL.to_string(),
    );
    headers
}
