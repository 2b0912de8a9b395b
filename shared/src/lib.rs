//! Shared library for the video summarizer Lambda functions.
//!
//! This crate holds everything the two functions need: URL parsing, transcript
//! retrieval, the Bedrock summarization call, HTML formatting and the HTTP
//! envelope exchanged between the router and the summarizer.

pub mod bedrock;
pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod invoke;
pub mod models;
pub mod prompt;
pub mod router;
pub mod service;
pub mod transcript;
pub mod video;
pub mod youtube;

pub use bedrock::BedrockModel;
pub use config::Config;
pub use error::{Error, Result};
pub use format::{format_summary_html, ResponseFormat};
pub use http::Envelope;
pub use invoke::{LambdaInvoker, SummarizerInvoker};
pub use models::{SummarizeRequest, SummaryResponse};
pub use prompt::{LanguageModel, ModelSettings, Prompt, PromptStyle};
pub use router::route;
pub use service::Summarizer;
pub use transcript::{retrieve_transcript, CaptionEntry, CaptionTrack, TrackList, TranscriptSource};
pub use video::extract_video_id;
pub use youtube::YouTubeTranscripts;
