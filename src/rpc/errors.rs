//! Client-facing JSON-RPC error payloads.
//!
//! Clients always receive a well-formed error envelope, never a raw error
//! string or an empty body. The `id` defaults to null when the caller does
//! not supply one, matching the wire behavior callers depend on.

use serde_json::{json, Value};

pub const CODE_INVALID_REQUEST: i64 = -32600;
pub const CODE_UPSTREAM_UNAVAILABLE: i64 = -32000;

const MSG_INVALID_REQUEST: &str = "Invalid Request";
const MSG_UPSTREAM_UNAVAILABLE: &str = "Upstream unavailable";

/// Error payload for a structurally invalid request.
pub fn invalid_request(id: Option<Value>) -> Value {
    error(CODE_INVALID_REQUEST, MSG_INVALID_REQUEST, id)
}

/// Error payload for a forwarding failure, including breaker short-circuits.
pub fn upstream_unavailable(id: Option<Value>) -> Value {
    error(CODE_UPSTREAM_UNAVAILABLE, MSG_UPSTREAM_UNAVAILABLE, id)
}

fn error(code: i64, message: &str, id: Option<Value>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "error": {
            "code": code,
            "message": message,
        },
        "id": id.unwrap_or(Value::Null),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_request_payload_shape() {
        let payload = invalid_request(None);
        assert_eq!(payload["jsonrpc"], "2.0");
        assert_eq!(payload["error"]["code"], -32600);
        assert_eq!(payload["error"]["message"], "Invalid Request");
        assert!(payload["id"].is_null());
    }

    #[test]
    fn upstream_unavailable_payload_shape() {
        let payload = upstream_unavailable(None);
        assert_eq!(payload["error"]["code"], -32000);
        assert_eq!(payload["error"]["message"], "Upstream unavailable");
        assert!(payload["id"].is_null());
    }

    #[test]
    fn explicit_id_is_echoed() {
        let payload = invalid_request(Some(json!(7)));
        assert_eq!(payload["id"], 7);
    }
}
