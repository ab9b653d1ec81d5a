//! Response envelope and fixed header policy.

use crate::error::ServerError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Permissive cross-origin headers attached to every reply.
///
/// These are a fixed policy of the boundary, not configurable.
const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type, Authorization"),
];

/// Returns the fixed CORS header set.
#[must_use]
pub fn cors_headers() -> &'static [(&'static str, &'static str)] {
    &CORS_HEADERS
}

/// JSON envelope carried by every non-preflight reply.
///
/// Success and failure alike include `success` and `timestamp`; failures
/// carry a human-readable `error` and, for storage failures, the
/// underlying `details`.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Success payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Number of items in a list payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Human-readable success note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Human-readable failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Underlying failure detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// When the reply was produced.
    pub timestamp: DateTime<Utc>,
}

impl ApiResponse {
    fn base(success: bool) -> Self {
        Self {
            success,
            data: None,
            count: None,
            message: None,
            error: None,
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Success envelope with a payload.
    #[must_use]
    pub fn ok(data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::base(true)
        }
    }

    /// Success envelope with a payload and a note.
    #[must_use]
    pub fn ok_with_message(data: Value, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: Some(message.into()),
            ..Self::base(true)
        }
    }

    /// Success envelope without a payload.
    #[must_use]
    pub fn ok_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::base(true)
        }
    }

    /// Success envelope for a list, with its count.
    #[must_use]
    pub fn list(items: Vec<Value>) -> Self {
        Self {
            count: Some(items.len()),
            data: Some(Value::Array(items)),
            ..Self::base(true)
        }
    }

    /// Failure envelope with a message.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::base(false)
        }
    }
}

/// A fully rendered reply: status code plus optional JSON envelope.
#[derive(Debug)]
pub struct ApiReply {
    /// HTTP status code for the transport layer.
    pub status: u16,
    /// Envelope body; `None` for the empty preflight reply.
    pub body: Option<ApiResponse>,
}

impl ApiReply {
    /// A 200 reply with the given envelope.
    #[must_use]
    pub fn ok(body: ApiResponse) -> Self {
        Self {
            status: 200,
            body: Some(body),
        }
    }

    /// A JSON reply with an explicit status.
    #[must_use]
    pub fn with_status(status: u16, body: ApiResponse) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    /// The empty 204 reply answering a CORS preflight.
    #[must_use]
    pub fn no_content() -> Self {
        Self {
            status: 204,
            body: None,
        }
    }

    /// A failure reply derived from a boundary error.
    #[must_use]
    pub fn from_error(error: &ServerError) -> Self {
        let mut body = ApiResponse::failure(error.to_string());
        body.details = error.details();
        Self {
            status: error.status_code(),
            body: Some(body),
        }
    }

    /// Headers the transport layer must attach: content type (when there
    /// is a body) plus the fixed CORS set.
    #[must_use]
    pub fn headers(&self) -> Vec<(&'static str, &'static str)> {
        let mut headers = Vec::with_capacity(CORS_HEADERS.len() + 1);
        if self.body.is_some() {
            headers.push(("Content-Type", "application/json"));
        }
        headers.extend_from_slice(&CORS_HEADERS);
        headers
    }

    /// Renders the body as pretty-printed JSON, if there is one.
    #[must_use]
    pub fn body_json(&self) -> Option<String> {
        self.body
            .as_ref()
            .and_then(|b| serde_json::to_string_pretty(b).ok())
    }
}
