use async_trait::async_trait;
use shared::{CaptionEntry, CaptionTrack, Error, Result, TrackList, TranscriptSource};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockTranscripts {
    pub tracks: Vec<CaptionTrack>,
    pub texts: Vec<String>,
    pub fail_with: Option<String>,
    pub fetched: Arc<Mutex<Vec<CaptionTrack>>>,
}

impl MockTranscripts {
    /// A single manual English track with the given entry texts.
    pub fn with_texts(texts: &[&str]) -> Self {
        Self::with_tracks(vec![track("en", false)], texts)
    }

    pub fn with_tracks(tracks: Vec<CaptionTrack>, texts: &[&str]) -> Self {
        Self {
            tracks,
            texts: texts.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::default()
        }
    }
}

pub fn track(lang: &str, generated: bool) -> CaptionTrack {
    CaptionTrack {
        language_code: lang.to_string(),
        name: lang.to_string(),
        is_generated: generated,
        base_url: format!("https://captions.test/{}", lang),
    }
}

#[async_trait]
impl TranscriptSource for MockTranscripts {
    async fn list_tracks(&self, _video_id: &str) -> Result<TrackList> {
        if let Some(ref msg) = self.fail_with {
            return Err(Error::Internal(msg.clone()));
        }
        Ok(TrackList {
            tracks: self.tracks.clone(),
            default_language: None,
        })
    }

    async fn fetch_entries(&self, track: &CaptionTrack) -> Result<Vec<CaptionEntry>> {
        self.fetched.lock().unwrap().push(track.clone());
        Ok(self
            .texts
            .iter()
            .enumerate()
            .map(|(i, text)| CaptionEntry {
                text: text.clone(),
                start: i as f64,
                duration: 1.0,
            })
            .collect())
    }
}
