//! Mapping of transport failures and HTTP error responses to [`AppError`].

use reqwest::StatusCode;
use serde_json::Value;

use filedesk_core::error::{AppError, ErrorKind};

/// Wrap a transport-level failure (connect, timeout, body read).
pub fn transport(action: &str, err: reqwest::Error) -> AppError {
    let message = if err.is_timeout() {
        format!("{action}: the server did not answer in time")
    } else if err.is_connect() {
        format!("{action}: could not reach the server")
    } else {
        format!("{action}: request failed")
    };
    AppError::with_source(ErrorKind::ExternalService, message, err)
}

/// Translate a non-success response into an error of the matching kind.
pub fn from_status(action: &str, status: StatusCode, body: &str) -> AppError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let detail = parsed.as_ref().and_then(detail_message);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::authentication(
            detail.unwrap_or_else(|| format!("{action}: not authorized")),
        ),
        StatusCode::BAD_REQUEST => {
            let message = parsed
                .as_ref()
                .and_then(first_field_error)
                .unwrap_or_else(|| format!("{action}: the server rejected the request"));
            AppError::validation(message)
        }
        StatusCode::NOT_FOUND => {
            AppError::not_found(detail.unwrap_or_else(|| format!("{action}: not found")))
        }
        _ => AppError::new(
            ErrorKind::ExternalService,
            format!("{action} failed with status {}", status.as_u16()),
        ),
    }
}

/// The `detail` string of an error body, if present.
pub fn detail_message(body: &Value) -> Option<String> {
    body.get("detail")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// First message of the first field in a `{field: [messages]}` body.
///
/// Field order is the order the server sent. A bare string value counts as
/// a single message.
pub fn first_field_error(body: &Value) -> Option<String> {
    match body {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_field_error),
        Value::Object(fields) => fields.values().find_map(first_field_error),
        _ => None,
    }
}
