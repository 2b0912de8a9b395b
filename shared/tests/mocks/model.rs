use async_trait::async_trait;
use shared::{Error, LanguageModel, Prompt, Result};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
pub struct MockModel {
    pub summary: String,
    pub calls: Arc<Mutex<Vec<Prompt>>>,
    pub fail_with: Option<String>,
    pub delay: Option<Duration>,
}

impl MockModel {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
            delay: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::new("")
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new("late")
        }
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn complete(&self, prompt: &Prompt) -> Result<String> {
        self.calls.lock().unwrap().push(prompt.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(ref msg) = self.fail_with {
            return Err(Error::SummarizationFailed(msg.clone()));
        }
        Ok(self.summary.clone())
    }
}
