//! Bedrock Runtime client for Anthropic models.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_bedrockruntime::config::retry::RetryConfig;
use aws_sdk_bedrockruntime::config::timeout::TimeoutConfig;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::prompt::{LanguageModel, ModelSettings, Prompt};
use crate::{Config, Error, Result};

const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Anthropic Messages request body as accepted by Bedrock.
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    anthropic_version: &'static str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    top_p: f32,
    top_k: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<TextBlock<'a>>,
}

#[derive(Debug, Serialize)]
struct TextBlock<'a> {
    #[serde(rename = "type")]
    block_type: &'static str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

/// Language model backed by `InvokeModel` on Bedrock Runtime.
pub struct BedrockModel {
    client: BedrockClient,
    settings: ModelSettings,
}

impl BedrockModel {
    /// Wrap an existing client.
    pub fn new(client: BedrockClient, settings: ModelSettings) -> Self {
        Self { client, settings }
    }

    /// Build a client with standard-mode retries and an operation timeout.
    pub fn from_sdk_config(sdk_config: &aws_config::SdkConfig, config: &Config) -> Self {
        let client_config = aws_sdk_bedrockruntime::config::Builder::from(sdk_config)
            .retry_config(RetryConfig::standard().with_max_attempts(config.model_max_attempts))
            .timeout_config(
                TimeoutConfig::builder()
                    .connect_timeout(Duration::from_secs(5))
                    .operation_timeout(config.model_timeout)
                    .build(),
            )
            .build();

        Self::new(BedrockClient::from_conf(client_config), config.model.clone())
    }
}

#[async_trait]
impl LanguageModel for BedrockModel {
    async fn complete(&self, prompt: &Prompt) -> Result<String> {
        let body = request_body(&self.settings, prompt)?;

        info!("Invoking Bedrock model {}", self.settings.model_id);

        let response = self
            .client
            .invoke_model()
            .model_id(&self.settings.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                error!("Bedrock invocation failed: {}", DisplayErrorContext(&e));
                Error::SummarizationFailed(format!("{}", DisplayErrorContext(&e)))
            })?;

        response_text(response.body().as_ref())
    }
}

fn request_body(settings: &ModelSettings, prompt: &Prompt) -> Result<Vec<u8>> {
    let request = MessagesRequest {
        anthropic_version: ANTHROPIC_VERSION,
        max_tokens: settings.max_tokens,
        system: &prompt.system,
        messages: vec![Message {
            role: "user",
            content: vec![TextBlock {
                block_type: "text",
                text: &prompt.user,
            }],
        }],
        temperature: settings.temperature,
        top_p: settings.top_p,
        top_k: settings.top_k,
    };

    Ok(serde_json::to_vec(&request)?)
}

/// Concatenate the text blocks of a Messages response.
fn response_text(body: &[u8]) -> Result<String> {
    let response: MessagesResponse = serde_json::from_slice(body)
        .map_err(|e| Error::SummarizationFailed(format!("Unparseable model response: {}", e)))?;

    if response.stop_reason.as_deref() == Some("max_tokens") {
        warn!("Model output was cut off at the token ceiling");
    }

    let text: String = response
        .content
        .into_iter()
        .filter(|block| block.block_type == "text")
        .filter_map(|block| block.text)
        .collect();

    if text.trim().is_empty() {
        return Err(Error::SummarizationFailed(
            "Model response contained no text".to_string(),
        ));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn settings() -> ModelSettings {
        ModelSettings {
            model_id: "anthropic.claude-3-sonnet-20240229-v1:0".to_string(),
            max_tokens: 2000,
            temperature: 1.0,
            top_p: 0.999,
            top_k: 40,
        }
    }

    #[test]
    fn test_client_retry_and_timeout() {
        let sdk_config = aws_config::SdkConfig::builder()
            .region(aws_config::Region::new("us-east-1"))
            .behavior_version(aws_config::BehaviorVersion::latest())
            .build();
        let config = Config::from_lookup(|key| match key {
            "MODEL_MAX_ATTEMPTS" => Some("4".to_string()),
            "MODEL_TIMEOUT_SECS" => Some("90".to_string()),
            _ => None,
        })
        .unwrap();

        let model = BedrockModel::from_sdk_config(&sdk_config, &config);
        let client_config = model.client.config();

        assert_eq!(client_config.retry_config().unwrap().max_attempts(), 4);
        assert_eq!(
            client_config.timeout_config().unwrap().operation_timeout(),
            Some(Duration::from_secs(90))
        );
        assert_eq!(model.settings.model_id, config.model.model_id);
    }

    #[test]
    fn test_request_body_shape() {
        let prompt = Prompt {
            system: "system text".to_string(),
            user: "summarize this".to_string(),
        };
        let body: Value = serde_json::from_slice(&request_body(&settings(), &prompt).unwrap()).unwrap();

        assert_eq!(body["anthropic_version"], "bedrock-2023-05-31");
        assert_eq!(body["max_tokens"], 2000);
        assert_eq!(body["top_k"], 40);
        assert_eq!(body["system"], "system text");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"][0]["type"], "text");
        assert_eq!(body["messages"][0]["content"][0]["text"], "summarize this");
    }

    #[test]
    fn test_response_text() {
        let body = br#"{"content":[{"type":"text","text":"A short summary.\n\n- one"}],"stop_reason":"end_turn"}"#;
        assert_eq!(response_text(body).unwrap(), "A short summary.\n\n- one");
    }

    #[test]
    fn test_response_text_joins_text_blocks() {
        let body = br#"{"content":[{"type":"text","text":"Part one. "},{"type":"tool_use"},{"type":"text","text":"Part two."}]}"#;
        assert_eq!(response_text(body).unwrap(), "Part one. Part two.");
    }

    #[test]
    fn test_empty_response_is_failure() {
        let err = response_text(br#"{"content":[]}"#).unwrap_err();
        assert!(matches!(err, Error::SummarizationFailed(_)));

        let err = response_text(b"not json").unwrap_err();
        assert!(matches!(err, Error::SummarizationFailed(_)));
    }
}
