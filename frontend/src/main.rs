//! Front-end Lambda - Serves the summarizer page and relays summarize requests.
//!
//! - GET / - the HTML page
//! - POST / - forwarded to the summarizer Lambda, its envelope relayed as JSON

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::{route, LambdaInvoker};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across requests.
struct AppState {
    invoker: LambdaInvoker,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let lambda_client = aws_sdk_lambda::Client::new(&config);

        let function_name = std::env::var("SUMMARIZER_FUNCTION_NAME")
            .map_err(|_| "SUMMARIZER_FUNCTION_NAME not set")?;

        Ok(Self {
            invoker: LambdaInvoker::new(lambda_client, function_name),
        })
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    info!("Front-end request: {} {}", event.method(), event.uri().path());

    Ok(route(event.method(), event.body().as_ref(), &state.invoker).await)
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
