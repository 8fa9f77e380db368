//! Response types for the Cianbox API SDK.
//!
//! This module provides [`ApiResult`], the decoded outcome of a single API
//! call, together with the envelope inspection that turns
//! `{"status": "error", ...}` documents into [`ApiError::Application`].

use std::fmt::Write;

use serde_json::Value;

use crate::clients::errors::ApiError;

/// The decoded result of a Cianbox API call.
///
/// Generic verb methods return the whole `ApiResult` so that callers can
/// inspect the HTTP status themselves; named resource operations return
/// only [`ApiResult::into_payload`].
///
/// # Example
///
/// ```rust
/// use cianbox_api::ApiResult;
/// use serde_json::json;
///
/// let result = ApiResult::new(200, json!({"status": "ok", "body": [{"id": 1}]}));
/// assert!(result.is_ok());
/// assert_eq!(result.payload(), &json!([{"id": 1}]));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResult {
    /// The HTTP status code.
    pub status: u16,
    /// The decoded JSON body (`null` when the response was empty).
    pub body: Value,
}

impl ApiResult {
    /// Creates a new `ApiResult`.
    #[must_use]
    pub const fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Returns `true` if the HTTP status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }

    /// Returns the envelope `status` field, if present.
    #[must_use]
    pub fn envelope_status(&self) -> Option<&str> {
        self.body.get("status").and_then(Value::as_str)
    }

    /// Returns the resource payload.
    ///
    /// Cianbox wraps resource data in the envelope's `body` member. When the
    /// document has no such member the whole document is the payload.
    #[must_use]
    pub fn payload(&self) -> &Value {
        self.body.get("body").unwrap_or(&self.body)
    }

    /// Consumes the result, returning the resource payload.
    #[must_use]
    pub fn into_payload(self) -> Value {
        match self.body {
            Value::Object(mut map) => match map.remove("body") {
                Some(payload) => payload,
                None => Value::Object(map),
            },
            other => other,
        }
    }
}

/// Decodes a raw response body.
///
/// An empty body decodes to `null`. Anything else must be JSON.
pub(crate) fn decode_body(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(text).map_err(|e| ApiError::InvalidPayload {
        reason: e.to_string(),
        data: text.to_string(),
    })
}

/// Fails with [`ApiError::Application`] when `body` is an error envelope.
///
/// The message is `"<status>: <message>"` followed by one
/// `" - <code>: <description>"` segment for a single `cause` object, or one
/// segment per element of a `cause` array in order.
pub(crate) fn check_envelope(body: &Value) -> Result<(), ApiError> {
    let status = match body.get("status").and_then(Value::as_str) {
        Some(status @ "error") => status,
        _ => return Ok(()),
    };

    let mut message = format!(
        "{status}: {}",
        body.get("message").map(value_text).unwrap_or_default()
    );

    match body.get("cause") {
        Some(cause @ Value::Object(fields))
            if fields.contains_key("code") && fields.contains_key("description") =>
        {
            push_cause(&mut message, cause);
        }
        Some(Value::Array(causes)) => {
            for cause in causes.iter().filter(|c| c.is_object()) {
                push_cause(&mut message, cause);
            }
        }
        _ => {}
    }

    tracing::warn!(error = %message, "Cianbox API returned an error envelope");
    Err(ApiError::Application { message })
}

fn push_cause(message: &mut String, cause: &Value) {
    let code = cause.get("code").map(value_text).unwrap_or_default();
    let description = cause.get("description").map(value_text).unwrap_or_default();
    let _ = write!(message, " - {code}: {description}");
}

/// Renders a JSON scalar as plain text (strings without quotes, `null` empty).
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
