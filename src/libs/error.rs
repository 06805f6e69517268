//! Error taxonomy of the task service client.
//!
//! - `Auth`: rejected credentials or an expired/invalid token (HTTP 401)
//! - `Validation`: client-side form checks that fail before any request is sent
//! - `Network`: the request did not complete
//! - `NotFound`: HTTP 404
//! - `Api`: any other non-2xx status, carrying the backend's payload when present
//! - `Decode`: a 2xx response whose body did not match the expected shape

use super::storage::StorageError;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Auth { message: String, payload: Option<Value> },

    #[error("{0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    NotFound { message: String, payload: Option<Value> },

    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        payload: Option<Value>,
    },

    #[error("Unexpected response from the server: {0}")]
    Decode(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Builds the error for a non-2xx response from its status and (possibly empty) body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let payload = serde_json::from_str::<Value>(body).ok();
        let message = payload
            .as_ref()
            .and_then(message_from_payload)
            .unwrap_or_else(|| generic_message(status));

        match status {
            StatusCode::UNAUTHORIZED => ApiError::Auth { message, payload },
            StatusCode::NOT_FOUND => ApiError::NotFound { message, payload },
            _ => ApiError::Api {
                status: status.as_u16(),
                message,
                payload,
            },
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }

    /// Structured backend payload, when the server sent one.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            ApiError::Auth { payload, .. } | ApiError::NotFound { payload, .. } | ApiError::Api { payload, .. } => {
                payload.as_ref()
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Network(error.to_string())
        }
    }
}

fn generic_message(status: StatusCode) -> String {
    match status {
        StatusCode::UNAUTHORIZED => "Authentication failed".to_string(),
        StatusCode::NOT_FOUND => "Not found".to_string(),
        _ => format!("Request failed with status {}", status.as_u16()),
    }
}

/// Flattens the payload shapes the backend produces into one line.
///
/// Handles `{"detail": ".."}`, `{"error": ".."}`, `{"non_field_errors": [..]}`
/// and field maps like `{"password": ["too short"]}`.
pub fn message_from_payload(payload: &Value) -> Option<String> {
    match payload {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(message_from_payload),
        Value::Object(map) => {
            for key in ["detail", "error", "message", "non_field_errors"] {
                if let Some(message) = map.get(key).and_then(message_from_payload) {
                    return Some(message);
                }
            }
            map.iter()
                .find_map(|(field, value)| message_from_payload(value).map(|message| format!("{}: {}", field, message)))
        }
        _ => None,
    }
}
