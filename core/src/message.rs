//! User-facing messages for classified failures.

use serde_json::Value;

use crate::error::DomainError;

/// A short, stable message suitable for showing to an end user.
///
/// Never empty. This is the error side of every `TaskApi` operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct UserMessage(String);

impl UserMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<DomainError> for UserMessage {
    fn from(error: DomainError) -> Self {
        UserMessage(ui_message(&error))
    }
}

/// Map a `DomainError` onto its fixed user-facing string.
pub fn ui_message(error: &DomainError) -> String {
    match error {
        DomainError::Timeout => "The request timed out. Please try again.".to_string(),
        DomainError::Network => "Network issue detected. Check your internet connection.".to_string(),
        DomainError::NotFound { .. } => "The requested item was not found.".to_string(),
        DomainError::Unauthorized { .. } => {
            "You don't have permission to perform this action.".to_string()
        }
        DomainError::Validation { .. } => match error.fields() {
            Some(fields) if !fields.is_empty() => {
                let parts: Vec<String> = fields
                    .iter()
                    .map(|(field, message)| format!("{field}: {}", render(message)))
                    .collect();
                format!("Invalid input: {}", parts.join("; "))
            }
            _ => "Invalid input provided. Please check your data.".to_string(),
        },
        DomainError::Generic {
            status: Some(500..=599),
            ..
        } => "A server error occurred. Please try again later.".to_string(),
        DomainError::Generic { message, .. } if message.is_empty() => {
            "An unexpected error occurred.".to_string()
        }
        DomainError::Generic { message, .. } => message.clone(),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
