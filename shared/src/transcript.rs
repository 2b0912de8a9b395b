//! Transcript retrieval with manual-first track selection.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::{Error, Result};

/// A caption track offered for a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionTrack {
    /// BCP-47 style language code, e.g. `en` or `pt-BR`
    pub language_code: String,
    /// Human readable track name
    pub name: String,
    /// True for automatically generated (speech recognition) captions
    pub is_generated: bool,
    /// Where the track's entries can be fetched from
    pub base_url: String,
}

/// All caption tracks available for a video.
#[derive(Debug, Clone, Default)]
pub struct TrackList {
    pub tracks: Vec<CaptionTrack>,
    /// Language of the video's default caption track, when known
    pub default_language: Option<String>,
}

/// A single caption entry. Timing is kept for completeness but not used
/// when flattening to text.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionEntry {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// External provider of per-video captions.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// List the caption tracks available for a video.
    async fn list_tracks(&self, video_id: &str) -> Result<TrackList>;

    /// Fetch the ordered entries of one track.
    async fn fetch_entries(&self, track: &CaptionTrack) -> Result<Vec<CaptionEntry>>;
}

/// Pick the track to summarize.
///
/// Manually created tracks always beat generated ones. Within a kind the
/// order is: preferred languages in the given order, the video's default
/// language, then ascending language code and name.
pub fn select_track<'a>(list: &'a TrackList, preferred: &[String]) -> Option<&'a CaptionTrack> {
    let rank = |track: &CaptionTrack| {
        let preference = preferred
            .iter()
            .position(|lang| lang.eq_ignore_ascii_case(&track.language_code))
            .unwrap_or(preferred.len());
        let is_default = list
            .default_language
            .as_deref()
            .is_some_and(|lang| lang.eq_ignore_ascii_case(&track.language_code));
        (
            track.is_generated,
            preference,
            !is_default,
            track.language_code.to_ascii_lowercase(),
            track.name.clone(),
        )
    };

    list.tracks.iter().min_by_key(|track| rank(track))
}

/// Join entry texts with single spaces, in their original order.
pub fn join_entries(entries: &[CaptionEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Retrieve the full transcript text for a video.
///
/// Every failure collapses into `Error::TranscriptUnavailable`; there is no
/// retry.
pub async fn retrieve_transcript<S>(source: &S, video_id: &str, preferred: &[String]) -> Result<String>
where
    S: TranscriptSource + ?Sized,
{
    let list = source.list_tracks(video_id).await.map_err(unavailable)?;

    let track = select_track(&list, preferred).ok_or_else(|| {
        warn!("No caption tracks for video {}", video_id);
        Error::TranscriptUnavailable(format!("no transcripts for video {}", video_id))
    })?;

    info!(
        "Using {} caption track '{}' for video {}",
        if track.is_generated { "generated" } else { "manual" },
        track.language_code,
        video_id
    );

    let entries = source.fetch_entries(track).await.map_err(unavailable)?;
    let text = join_entries(&entries);

    if text.is_empty() {
        warn!("Caption track for video {} has no text", video_id);
        return Err(Error::TranscriptUnavailable(format!(
            "empty transcript for video {}",
            video_id
        )));
    }

    Ok(text)
}

fn unavailable(err: Error) -> Error {
    match err {
        Error::TranscriptUnavailable(_) => err,
        other => {
            warn!("Transcript source failed: {}", other);
            Error::TranscriptUnavailable(other.to_string())
        }
    }
}
