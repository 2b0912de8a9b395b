//! Summarization prompt and the language-model seam.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::Result;

const SYSTEM_PROMPT: &str =
    "You are an AI assistant that excels at summarizing YouTube video transcripts.";

const TAKEAWAYS_INSTRUCTION: &str = "At the end of your summary, give a bullet point list of \
the key takeaways and any action items if applicable. Start each bullet with \"- \" and put the \
list in its own final paragraph, separated from the text above by a blank line.";

/// Which instruction contract is sent to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptStyle {
    /// Introduction, segmented body and conclusion, no length cap.
    #[default]
    Structured,
    /// A single summary of 500 words or less.
    Concise,
}

impl FromStr for PromptStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "structured" => Ok(PromptStyle::Structured),
            "concise" => Ok(PromptStyle::Concise),
            other => Err(format!("unknown prompt style '{}'", other)),
        }
    }
}

impl fmt::Display for PromptStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptStyle::Structured => write!(f, "structured"),
            PromptStyle::Concise => write!(f, "concise"),
        }
    }
}

/// A system prompt plus the user turn carrying the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl PromptStyle {
    /// Build the prompt for a transcript. The transcript is embedded verbatim.
    pub fn build(&self, transcript: &str) -> Prompt {
        let instruction = match self {
            PromptStyle::Structured => format!(
                "Summarize the following YouTube video transcript into clear and readable \
paragraphs. Begin with a short introduction stating what the video is about. Then cover the \
main ideas in the order they are discussed, one paragraph per topic or segment, including any \
other interesting parts of the content. Close with a concluding paragraph. {}",
                TAKEAWAYS_INSTRUCTION
            ),
            PromptStyle::Concise => format!(
                "Summarize the following YouTube video transcript in 500 words or less. Capture \
the main ideas discussed and any key topics you identify. {}",
                TAKEAWAYS_INSTRUCTION
            ),
        };

        Prompt {
            system: SYSTEM_PROMPT.to_string(),
            user: format!("{}\n\nTranscript:\n\n{}", instruction, transcript),
        }
    }
}

/// Model identifier and sampling parameters for a summary request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

/// A hosted language model that turns a prompt into text.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Run the prompt and return the model's raw text.
    async fn complete(&self, prompt: &Prompt) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prompt_style() {
        assert_eq!("structured".parse::<PromptStyle>(), Ok(PromptStyle::Structured));
        assert_eq!("CONCISE".parse::<PromptStyle>(), Ok(PromptStyle::Concise));
        assert!("haiku".parse::<PromptStyle>().is_err());
    }

    #[test]
    fn test_transcript_embedded_verbatim() {
        let transcript = "hello <b>world</b> & more";
        for style in [PromptStyle::Structured, PromptStyle::Concise] {
            let prompt = style.build(transcript);
            assert!(prompt.user.ends_with(transcript));
            assert!(prompt.user.contains("bullet point list"));
            assert_eq!(prompt.system, SYSTEM_PROMPT);
        }
    }

    #[test]
    fn test_styles_differ() {
        let structured = PromptStyle::Structured.build("x");
        let concise = PromptStyle::Concise.build("x");
        assert!(structured.user.contains("introduction"));
        assert!(!structured.user.contains("500 words"));
        assert!(concise.user.contains("500 words or less"));
    }
}
