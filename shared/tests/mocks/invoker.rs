use async_trait::async_trait;
use shared::{Envelope, Error, Result, SummarizerInvoker};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockInvoker {
    pub envelope: Option<Envelope>,
    pub payloads: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockInvoker {
    pub fn returning(envelope: Envelope) -> Self {
        Self {
            envelope: Some(envelope),
            payloads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            envelope: None,
            payloads: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl SummarizerInvoker for MockInvoker {
    async fn invoke(&self, payload: Vec<u8>) -> Result<Envelope> {
        self.payloads.lock().unwrap().push(payload);
        self.envelope
            .clone()
            .ok_or_else(|| Error::Aws("Unhandled: function timed out".to_string()))
    }
}
