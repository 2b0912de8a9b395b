//! Error types for the video summarizer Lambda functions.

use std::time::Duration;

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while summarizing a video.
#[derive(Error, Debug)]
pub enum Error {
    /// The submitted URL has no recoverable video identifier
    #[error("Invalid YouTube URL")]
    InvalidUrl,

    /// The request body could not be parsed
    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    /// No transcript could be obtained for the video
    #[error("Transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    /// The model invocation failed or returned nothing usable
    #[error("Summarization failed: {0}")]
    SummarizationFailed(String),

    /// The request exceeded its overall time budget
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// AWS SDK error
    #[error("AWS error: {0}")]
    Aws(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidUrl | Error::InvalidRequest(_) | Error::TranscriptUnavailable(_) => 400,
            Error::Timeout(_) => 504,
            _ => 500,
        }
    }

    /// Message shown to the caller.
    ///
    /// Transcript and model failures collapse into fixed messages; the detail
    /// only goes to the logs.
    pub fn public_message(&self) -> String {
        match self {
            Error::InvalidUrl => "Invalid YouTube URL".to_string(),
            Error::InvalidRequest(detail) => format!("Invalid request body: {}", detail),
            Error::TranscriptUnavailable(_) => "Failed to retrieve video transcript".to_string(),
            Error::SummarizationFailed(_) => "Failed to summarize video".to_string(),
            Error::Timeout(_) => "Request timed out".to_string(),
            other => format!("An unexpected error occurred: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::InvalidUrl.status_code(), 400);
        assert_eq!(Error::TranscriptUnavailable("no captions".into()).status_code(), 400);
        assert_eq!(Error::SummarizationFailed("throttled".into()).status_code(), 500);
        assert_eq!(Error::Timeout(Duration::from_secs(1)).status_code(), 504);
        assert_eq!(Error::Internal("boom".into()).status_code(), 500);
    }

    #[test]
    fn test_public_messages_hide_detail() {
        let err = Error::TranscriptUnavailable("HTTP 404 from watch page".into());
        assert_eq!(err.public_message(), "Failed to retrieve video transcript");

        let err = Error::SummarizationFailed("ThrottlingException".into());
        assert_eq!(err.public_message(), "Failed to summarize video");
    }

    #[test]
    fn test_unexpected_failure_passes_detail() {
        let err = Error::Internal("boom".into());
        assert_eq!(
            err.public_message(),
            "An unexpected error occurred: Internal error: boom"
        );
    }
}
