//! Turning a completed `HttpResponse` into a payload or a `DomainError`.
//!
//! Success bodies are normalized so callers always receive a JSON object:
//! objects pass through, lists are wrapped as `{"data": [...]}`, and anything
//! else (empty body, invalid JSON, scalars) becomes `{}`.

use serde_json::{Map, Value};

use crate::error::{DomainError, ErrorPayload};
use crate::http::HttpResponse;

/// Key under which list payloads are wrapped.
pub const ENVELOPE_KEY: &str = "data";

const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";

/// Classify a response: normalized payload on 2xx, `DomainError` otherwise.
pub fn classify(response: &HttpResponse) -> Result<Value, DomainError> {
    if response.is_success() {
        return Ok(normalize_payload(parse_json(&response.body)));
    }
    let payload = match parse_json(&response.body) {
        Some(Value::Object(map)) => map,
        _ => ErrorPayload::new(),
    };
    Err(error_for_status(response.status, payload))
}

/// Map a non-2xx status and its parsed body onto a `DomainError`.
pub fn error_for_status(status: u16, details: ErrorPayload) -> DomainError {
    match status {
        404 => DomainError::NotFound { status, details },
        401 | 403 => DomainError::Unauthorized { status, details },
        400 => DomainError::Validation { status, details },
        500..=599 => DomainError::Generic {
            status: Some(status),
            message: SERVER_ERROR_MESSAGE.to_string(),
            details,
        },
        _ => DomainError::Generic {
            status: Some(status),
            message: payload_message(&details)
                .unwrap_or_else(|| format!("Request failed with status {status}")),
            details,
        },
    }
}

/// Pull the list out of either a bare list or a `{"data": [...]}` envelope.
pub fn unwrap_list(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(ENVELOPE_KEY) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn parse_json(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    serde_json::from_str(body).ok()
}

fn normalize_payload(parsed: Option<Value>) -> Value {
    match parsed {
        Some(Value::Object(map)) => Value::Object(map),
        Some(Value::Array(items)) => {
            let mut envelope = Map::new();
            envelope.insert(ENVELOPE_KEY.to_string(), Value::Array(items));
            Value::Object(envelope)
        }
        _ => Value::Object(Map::new()),
    }
}

/// First non-empty string among `message` and `error`.
fn payload_message(details: &ErrorPayload) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| details.get(*key)?.as_str())
        .find(|message| !message.is_empty())
        .map(str::to_string)
}
