//! User-facing messages for failed API calls.
//!
//! Errors reach the client in several shapes: the structured body the API
//! returns (`{"error": {...}}`), an HTTP client error wrapping a response
//! (`{"response": {"status": .., "data": ..}}`), or a bare object with a
//! `message`. Extraction is best effort and always yields some text.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use ts_rs::TS;

pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";
pub const NETWORK_ERROR_MESSAGE: &str = "Please check your network connection";

/// Structured error returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
pub struct ApiErrorBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "unknown")]
    pub details: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

impl ApiErrorResponse {
    pub fn new(kind: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: ApiErrorBody {
                kind: kind.into(),
                message: message.into(),
                status_code,
                details: None,
            },
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.error.details = Some(details);
        self
    }
}

/// True when the value carries `error.message` as a string.
pub fn is_api_error(error: &Value) -> bool {
    api_error_message(error).is_some()
}

fn api_error_message(error: &Value) -> Option<&str> {
    error.get("error")?.get("message")?.as_str()
}

fn response_data(error: &Value) -> Option<&Value> {
    error.get("response")?.get("data")
}

fn custom_message(error: &Value) -> Option<&str> {
    if let Some(message) = api_error_message(error) {
        return Some(message);
    }

    if let Some(data) = response_data(error) {
        if let Some(message) = api_error_message(data) {
            return Some(message);
        }
        if let Some(text) = data.as_str() {
            return Some(text);
        }
        if let Some(detail) = data.get("detail").and_then(Value::as_str) {
            return Some(detail);
        }
    }

    error.get("message").and_then(Value::as_str)
}

/// Best message available in the error, or [`UNKNOWN_ERROR_MESSAGE`].
pub fn error_message(error: &Value) -> String {
    custom_message(error)
        .unwrap_or(UNKNOWN_ERROR_MESSAGE)
        .to_string()
}

/// Generic message for an HTTP status code
pub fn status_message(status_code: u16) -> String {
    let message = match status_code {
        400 => "The request was invalid",
        401 => "Authentication is required",
        403 => "You do not have permission to access this resource",
        404 => "The requested resource was not found",
        422 => "The submitted data is not valid",
        500 => "A server error occurred",
        502 => "Unable to reach the server",
        503 => "The service is temporarily unavailable",
        other => return format!("An error occurred ({other})"),
    };
    message.to_string()
}

/// `details` of a structured API error, directly or inside `response.data`.
pub fn error_details(error: &Value) -> Option<Value> {
    let body = if is_api_error(error) {
        error
    } else {
        response_data(error).filter(|data| is_api_error(data))?
    };

    body.get("error")?
        .get("details")
        .filter(|details| !details.is_null())
        .cloned()
}

/// Render `details.validation_errors` as `field: message` lines.
pub fn format_validation_errors(details: &Value) -> Vec<String> {
    let Some(errors) = details.get("validation_errors").and_then(Value::as_array) else {
        return Vec::new();
    };

    errors
        .iter()
        .map(|err| {
            let field = err.get("field").map(display_value).unwrap_or_default();
            let message = err.get("message").map(display_value).unwrap_or_default();
            format!("{field}: {message}")
        })
        .collect()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Message to show the user for a failed request.
///
/// Without a response the request never reached the server. Otherwise a
/// message from the body wins over the generic text for the status code.
pub fn handle_api_error(error: &Value, context: Option<&str>) -> String {
    debug!(context = context.unwrap_or("-"), error = %error, "API request failed");

    let Some(response) = error.get("response").filter(|r| !r.is_null()) else {
        return NETWORK_ERROR_MESSAGE.to_string();
    };

    if let Some(message) = custom_message(error) {
        return message.to_string();
    }

    let status = response
        .get("status")
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
        .unwrap_or(500);
    status_message(status)
}
