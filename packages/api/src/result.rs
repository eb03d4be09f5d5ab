//! Normalized outcome of one HTTP call.

use serde_json::Value;
use store::Record;

/// `{ success, status, data | error }` wrapper around one exchange.
///
/// `data` is the parsed response body (the backend envelope
/// `{ success, data, message? }`); `error` is set only when no usable response
/// was obtained.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiResult {
    pub success: bool,
    pub status: Option<u16>,
    pub data: Option<Value>,
    pub error: Option<String>,
}

impl ApiResult {
    /// A response was received and parsed. `success` follows the 2xx class.
    pub fn completed(status: u16, data: Value) -> Self {
        Self {
            success: (200..300).contains(&status),
            status: Some(status),
            data: Some(data),
            error: None,
        }
    }

    /// No usable response (network, URL or body failure).
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            status: None,
            data: None,
            error: Some(error.into()),
        }
    }

    /// True when the call never produced a response.
    pub fn is_transport_failure(&self) -> bool {
        self.error.is_some()
    }

    /// The envelope's `data` member.
    pub fn payload(&self) -> Option<&Value> {
        self.data.as_ref()?.get("data")
    }

    /// The envelope's `data` member as a record list. Anything else is empty.
    pub fn records(&self) -> Vec<Record> {
        match self.payload() {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        }
    }

    /// Server-supplied `message`, or the transport error.
    pub fn message(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|body| body.get("message"))
            .and_then(Value::as_str)
            .or(self.error.as_deref())
    }

    /// [`message`](Self::message) with a generic fallback.
    pub fn message_or(&self, fallback: &str) -> String {
        self.message().unwrap_or(fallback).to_string()
    }
}
