//! JSON-RPC 2.0 envelope validation.
//!
//! Classification is pure: the same bytes always yield the same verdict and
//! no shared state is touched. A request is accepted only as a whole — one
//! bad element rejects an entire batch.

use serde_json::{Map, Value};

const FIELD_JSONRPC: &str = "jsonrpc";
const FIELD_METHOD: &str = "method";
const JSONRPC_VERSION: &str = "2.0";

/// A structurally valid JSON-RPC request body.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonRpcEnvelope {
    Single(Map<String, Value>),
    Batch(Vec<Map<String, Value>>),
}

impl JsonRpcEnvelope {
    /// Parse and validate raw request bytes.
    ///
    /// Returns `None` for anything that is not a well-formed single call or
    /// a non-empty batch of well-formed calls: malformed JSON, an empty or
    /// whitespace-only body, an empty array, a non-object batch element, a
    /// `jsonrpc` field other than the literal "2.0", or a missing/blank
    /// `method`.
    pub fn parse(raw: &[u8]) -> Option<Self> {
        let text = std::str::from_utf8(raw).ok()?;
        let trimmed = text.trim_start();
        if trimmed.is_empty() {
            return None;
        }

        if trimmed.starts_with('[') {
            let elements: Vec<Value> = serde_json::from_str(trimmed).ok()?;
            if elements.is_empty() {
                return None;
            }
            let mut calls = Vec::with_capacity(elements.len());
            for element in elements {
                match element {
                    Value::Object(call) if is_valid_call(&call) => calls.push(call),
                    _ => return None,
                }
            }
            Some(Self::Batch(calls))
        } else {
            match serde_json::from_str(trimmed).ok()? {
                Value::Object(call) if is_valid_call(&call) => Some(Self::Single(call)),
                _ => None,
            }
        }
    }

    /// Method names of every call, in request order.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.calls()
            .iter()
            .filter_map(|call| call.get(FIELD_METHOD)?.as_str())
    }

    fn calls(&self) -> &[Map<String, Value>] {
        match self {
            Self::Single(call) => std::slice::from_ref(call),
            Self::Batch(calls) => calls,
        }
    }
}

fn is_valid_call(call: &Map<String, Value>) -> bool {
    if call.get(FIELD_JSONRPC).and_then(Value::as_str) != Some(JSONRPC_VERSION) {
        return false;
    }
    match call.get(FIELD_METHOD).and_then(Value::as_str) {
        Some(method) => !method.trim().is_empty(),
        None => false,
    }
}
