//! Configuration management for Lambda functions.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::format::ResponseFormat;
use crate::prompt::{ModelSettings, PromptStyle};
use crate::{Error, Result};

/// Default Bedrock model used for summaries.
pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-sonnet-20240229-v1:0";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Model identifier and sampling parameters
    pub model: ModelSettings,
    /// Region the Bedrock client talks to
    pub bedrock_region: String,
    /// Prompt contract sent to the model
    pub prompt_style: PromptStyle,
    /// Whether the summary is returned as HTML or raw text
    pub response_format: ResponseFormat,
    /// Transport-level attempts for the model call
    pub model_max_attempts: u32,
    /// Ceiling for a single model invocation
    pub model_timeout: Duration,
    /// Ceiling for each transcript HTTP request
    pub transcript_timeout: Duration,
    /// Ceiling for the whole summarize request
    pub request_timeout: Duration,
    /// Transcript languages to prefer, in order
    pub preferred_languages: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bedrock_region = lookup("BEDROCK_REGION")
            .or_else(|| lookup("AWS_REGION"))
            .unwrap_or_else(|| "us-east-1".to_string());

        let preferred_languages = lookup("TRANSCRIPT_LANGUAGES")
            .map(|langs| {
                langs
                    .split(',')
                    .map(|l| l.trim().to_string())
                    .filter(|l| !l.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            model: ModelSettings {
                model_id: lookup("MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
                max_tokens: parse_or(&lookup, "MAX_TOKENS", 2000)?,
                temperature: parse_or(&lookup, "TEMPERATURE", 1.0)?,
                top_p: parse_or(&lookup, "TOP_P", 0.999)?,
                top_k: parse_or(&lookup, "TOP_K", 40)?,
            },
            bedrock_region,
            prompt_style: parse_or(&lookup, "PROMPT_STYLE", PromptStyle::Structured)?,
            response_format: parse_or(&lookup, "RESPONSE_FORMAT", ResponseFormat::Html)?,
            model_max_attempts: parse_or(&lookup, "MODEL_MAX_ATTEMPTS", 10)?,
            model_timeout: Duration::from_secs(parse_or(&lookup, "MODEL_TIMEOUT_SECS", 240)?),
            transcript_timeout: Duration::from_secs(parse_or(
                &lookup,
                "TRANSCRIPT_TIMEOUT_SECS",
                15,
            )?),
            request_timeout: Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 280)?),
            preferred_languages,
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset or blank.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("{} has invalid value {:?}: {}", key, raw, e))),
        _ => Ok(default),
    }
}
