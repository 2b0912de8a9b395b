//! HTTP envelope shared by the gateway and both handlers.

use std::collections::HashMap;

use lambda_http::{Body, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::SummarizeRequest;
use crate::{Error, Result};

/// API Gateway proxy style response: `{statusCode, headers, body}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status_code: u16,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_base64_encoded: bool,
}

impl Envelope {
    pub fn new(status_code: u16, body: impl Into<String>, content_type: &str) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), content_type.to_string());
        Self {
            status_code,
            headers,
            body: body.into(),
            is_base64_encoded: false,
        }
    }

    /// JSON body serialized from `data`.
    pub fn json<T: Serialize>(status_code: u16, data: &T) -> Result<Self> {
        let body = serde_json::to_string(data)?;
        Ok(Self::new(status_code, body, "application/json"))
    }

    /// A bare JSON string body such as `"Invalid YouTube URL"`.
    pub fn message(status_code: u16, message: &str) -> Self {
        let body = serde_json::to_string(message)
            .unwrap_or_else(|_| "\"Internal error\"".to_string());
        Self::new(status_code, body, "application/json")
    }

    pub fn from_error(err: &Error) -> Self {
        Self::message(err.status_code(), &err.public_message())
    }
}

/// Read the summarize request out of a Lambda event.
///
/// The summarizer is reached either straight from the gateway (proxy event
/// whose `body` holds the JSON text) or from the router, which forwards the
/// request body itself as the payload.
pub fn summarize_request_from_event(event: Value) -> Result<SummarizeRequest> {
    let payload = match event {
        Value::Object(ref fields) if fields.contains_key("httpMethod") || fields.contains_key("requestContext") => {
            match fields.get("body") {
                Some(Value::String(body)) => serde_json::from_str(body)
                    .map_err(|e| Error::InvalidRequest(e.to_string()))?,
                _ => return Err(Error::InvalidRequest("missing request body".to_string())),
            }
        }
        other => other,
    };

    serde_json::from_value(payload).map_err(|e| Error::InvalidRequest(e.to_string()))
}

/// Build a `lambda_http` response with the given content type.
pub fn response(status: u16, content_type: &str, body: impl Into<Body>) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("content-type", content_type)
        .body(body.into())
        .expect("Failed to build response")
}

/// JSON string error body, matching the summarizer's error envelopes.
pub fn error_response(status: u16, message: &str) -> Response<Body> {
    response(status, "application/json", Envelope::message(status, message).body)
}
