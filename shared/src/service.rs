//! The summarizer pipeline: URL, transcript, model, response.

use std::time::Duration;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::format::{format_summary_html, ResponseFormat};
use crate::http::{summarize_request_from_event, Envelope};
use crate::models::SummaryResponse;
use crate::prompt::{LanguageModel, PromptStyle};
use crate::transcript::{retrieve_transcript, TranscriptSource};
use crate::video::extract_video_id;
use crate::{Config, Error, Result};

/// Summarizes YouTube videos through a transcript source and a language model.
pub struct Summarizer<S, M> {
    transcripts: S,
    model: M,
    prompt_style: PromptStyle,
    response_format: ResponseFormat,
    preferred_languages: Vec<String>,
    request_timeout: Duration,
}

impl<S, M> Summarizer<S, M>
where
    S: TranscriptSource,
    M: LanguageModel,
{
    pub fn new(transcripts: S, model: M, config: &Config) -> Self {
        Self {
            transcripts,
            model,
            prompt_style: config.prompt_style,
            response_format: config.response_format,
            preferred_languages: config.preferred_languages.clone(),
            request_timeout: config.request_timeout,
        }
    }

    pub fn with_prompt_style(mut self, style: PromptStyle) -> Self {
        self.prompt_style = style;
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Summarize the video behind `youtube_url`.
    pub async fn summarize(&self, youtube_url: &str) -> Result<SummaryResponse> {
        let video_id = extract_video_id(youtube_url)?;
        info!("Summarizing video {}", video_id);

        let transcript =
            retrieve_transcript(&self.transcripts, &video_id, &self.preferred_languages).await?;
        info!(
            "Retrieved transcript for video {} ({} chars)",
            video_id,
            transcript.len()
        );

        let prompt = self.prompt_style.build(&transcript);
        let summary = self.model.complete(&prompt).await.map_err(|e| match e {
            Error::SummarizationFailed(_) => e,
            other => Error::SummarizationFailed(other.to_string()),
        })?;

        let summary = match self.response_format {
            ResponseFormat::Html => format_summary_html(&summary),
            ResponseFormat::Text => summary,
        };

        Ok(SummaryResponse::new(summary, self.response_format))
    }

    /// Handle one invocation, always producing an envelope.
    pub async fn handle(&self, event: Value) -> Envelope {
        let outcome = tokio::time::timeout(self.request_timeout, async {
            let request = summarize_request_from_event(event)?;
            let response = self.summarize(&request.youtube_url).await?;
            Envelope::json(200, &response)
        })
        .await
        .unwrap_or(Err(Error::Timeout(self.request_timeout)));

        match outcome {
            Ok(envelope) => envelope,
            Err(err) => {
                match &err {
                    Error::InvalidUrl | Error::InvalidRequest(_) => warn!("Rejected request: {}", err),
                    _ => error!("Summarize request failed: {}", err),
                }
                Envelope::from_error(&err)
            }
        }
    }
}
