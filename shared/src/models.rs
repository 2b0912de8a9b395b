//! Request and response payloads.

use serde::{Deserialize, Serialize};

use crate::format::ResponseFormat;

/// Summarize request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizeRequest {
    pub youtube_url: String,
}

/// Summarize response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
    /// Present only when `summary` holds server-rendered HTML
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl SummaryResponse {
    pub fn new(summary: String, format: ResponseFormat) -> Self {
        Self {
            summary,
            format: match format {
                ResponseFormat::Html => Some(format.to_string()),
                ResponseFormat::Text => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_response_has_only_summary() {
        let response = SummaryResponse::new("A short summary.".to_string(), ResponseFormat::Text);
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"summary":"A short summary."}"#
        );
    }

    #[test]
    fn test_html_response_is_tagged() {
        let response = SummaryResponse::new("<div></div>".to_string(), ResponseFormat::Html);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["format"], "html");
    }

    #[test]
    fn test_parse_request() {
        let request: SummarizeRequest =
            serde_json::from_str(r#"{"youtube_url": "https://youtu.be/abc123"}"#).unwrap();
        assert_eq!(request.youtube_url, "https://youtu.be/abc123");
    }
}
