//! Summarizer Lambda - Turns a YouTube URL into a model-written summary.
//!
//! Invoked synchronously by the front-end Lambda with the raw request body as
//! payload, or directly by API Gateway with a proxy event. Always answers with
//! a `{statusCode, headers, body}` envelope.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use shared::{BedrockModel, Config, Envelope, Summarizer, YouTubeTranscripts};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across invocations.
struct AppState {
    summarizer: Summarizer<YouTubeTranscripts, BedrockModel>,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env()?;

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.bedrock_region.clone()))
            .load()
            .await;

        let http_client = shared::youtube::build_client(config.transcript_timeout)?;

        info!(
            "Summarizer configured: model={} prompt={} format={}",
            config.model.model_id, config.prompt_style, config.response_format
        );

        Ok(Self {
            summarizer: Summarizer::new(
                YouTubeTranscripts::new(http_client),
                BedrockModel::from_sdk_config(&sdk_config, &config),
                &config,
            ),
        })
    }
}

async fn handler(state: Arc<AppState>, event: LambdaEvent<Value>) -> Result<Envelope, Error> {
    let (payload, context) = event.into_parts();
    info!("Summarize invocation {}", context.request_id);

    Ok(state.summarizer.handle(payload).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
