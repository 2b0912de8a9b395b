//! Client for invoking the summarizer Lambda.

use async_trait::async_trait;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;

use crate::http::Envelope;
use crate::{Error, Result};

/// Something that can run the summarizer synchronously.
#[async_trait]
pub trait SummarizerInvoker: Send + Sync {
    /// Send the raw request body and return the summarizer's envelope.
    async fn invoke(&self, payload: Vec<u8>) -> Result<Envelope>;
}

/// Invokes the summarizer function through the Lambda API.
pub struct LambdaInvoker {
    /// Lambda client for invoking the summarizer
    lambda_client: aws_sdk_lambda::Client,
    /// Summarizer function name/ARN
    function_name: String,
}

impl LambdaInvoker {
    pub fn new(lambda_client: aws_sdk_lambda::Client, function_name: String) -> Self {
        Self {
            lambda_client,
            function_name,
        }
    }
}

#[async_trait]
impl SummarizerInvoker for LambdaInvoker {
    async fn invoke(&self, payload: Vec<u8>) -> Result<Envelope> {
        let response = self
            .lambda_client
            .invoke()
            .function_name(&self.function_name)
            .invocation_type(InvocationType::RequestResponse)
            .payload(Blob::new(payload))
            .send()
            .await
            .map_err(|e| {
                Error::Aws(format!(
                    "Failed to invoke summarizer: {}",
                    aws_sdk_lambda::error::DisplayErrorContext(&e)
                ))
            })?;

        envelope_from_output(
            response.function_error(),
            response.payload().map(|payload| payload.as_ref()),
        )
    }
}

/// Turn a `RequestResponse` invocation result into the summarizer's envelope.
fn envelope_from_output(function_error: Option<&str>, payload: Option<&[u8]>) -> Result<Envelope> {
    if let Some(function_error) = function_error {
        return Err(Error::Aws(format!("Summarizer raised {}", function_error)));
    }

    let payload =
        payload.ok_or_else(|| Error::Aws("No response payload from summarizer".to_string()))?;

    serde_json::from_slice(payload)
        .map_err(|e| Error::Aws(format!("Failed to parse summarizer response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_from_payload() {
        let payload = br#"{"statusCode":200,"headers":{"Content-Type":"application/json"},"body":"{\"summary\":\"ok\"}"}"#;

        let envelope = envelope_from_output(None, Some(&payload[..])).unwrap();

        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.body, r#"{"summary":"ok"}"#);
    }

    #[test]
    fn test_function_error_is_failure() {
        let payload = br#"{"errorMessage":"boom","errorType":"Panic"}"#;

        let err = envelope_from_output(Some("Unhandled"), Some(&payload[..])).unwrap_err();

        assert!(matches!(err, Error::Aws(ref msg) if msg.contains("Unhandled")));
    }

    #[test]
    fn test_missing_payload_is_failure() {
        let err = envelope_from_output(None, None).unwrap_err();

        assert!(matches!(err, Error::Aws(ref msg) if msg.contains("No response payload")));
    }

    #[test]
    fn test_unparseable_payload_is_failure() {
        let err = envelope_from_output(None, Some(&b"not json"[..])).unwrap_err();

        assert!(matches!(err, Error::Aws(_)));
    }
}
