//! YouTube caption source backed by the InnerTube player API.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::transcript::{CaptionEntry, CaptionTrack, TrackList, TranscriptSource};
use crate::{Error, Result};

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

const WATCH_URL: &str = "https://www.youtube.com/watch";
const PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player";
const CLIENT_VERSION: &str = "2.20241126.01.00";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    status: String,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<PlayerCaptionTrack>,
    #[serde(default)]
    audio_tracks: Vec<AudioTrack>,
    default_audio_track_index: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerCaptionTrack {
    base_url: String,
    language_code: String,
    name: Option<TrackName>,
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackName {
    simple_text: Option<String>,
    #[serde(default)]
    runs: Vec<TextRun>,
}

#[derive(Debug, Deserialize)]
struct TextRun {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AudioTrack {
    default_caption_track_index: Option<usize>,
}

impl TrackName {
    fn into_text(self) -> String {
        match self.simple_text {
            Some(text) => text,
            None => self.runs.into_iter().map(|r| r.text).collect(),
        }
    }
}

/// Build the HTTP client used for caption requests.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))
}

/// Transcript source that scrapes caption tracks from YouTube.
#[derive(Clone)]
pub struct YouTubeTranscripts {
    client: reqwest::Client,
}

impl YouTubeTranscripts {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        self.client
            .get(url)
            .header("Accept-Language", "en-US")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(http_error)?
            .text()
            .await
            .map_err(http_error)
    }
}

#[async_trait]
impl TranscriptSource for YouTubeTranscripts {
    async fn list_tracks(&self, video_id: &str) -> Result<TrackList> {
        let watch_url = format!("{}?v={}", WATCH_URL, video_id);
        debug!("Fetching watch page: {}", watch_url);

        let page_html = self.get_text(&watch_url).await?;
        let api_key = extract_api_key(&page_html)?;

        let body = serde_json::json!({
            "context": {
                "client": {
                    "hl": "en",
                    "gl": "US",
                    "clientName": "WEB",
                    "clientVersion": CLIENT_VERSION
                }
            },
            "videoId": video_id
        });

        let response: PlayerResponse = self
            .client
            .post(format!("{}?key={}&prettyPrint=false", PLAYER_URL, api_key))
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(http_error)?
            .json()
            .await
            .map_err(http_error)?;

        track_list(response, video_id)
    }

    async fn fetch_entries(&self, track: &CaptionTrack) -> Result<Vec<CaptionEntry>> {
        debug!("Fetching caption track: lang={}", track.language_code);
        let xml = self.get_text(&track.base_url).await?;
        parse_caption_xml(&xml)
    }
}

fn http_error(err: reqwest::Error) -> Error {
    Error::TranscriptUnavailable(format!("HTTP request failed: {}", err))
}

fn extract_api_key(html: &str) -> Result<String> {
    static PRIMARY: OnceLock<Regex> = OnceLock::new();
    static FALLBACK: OnceLock<Regex> = OnceLock::new();

    let primary = PRIMARY.get_or_init(|| {
        Regex::new(r#""INNERTUBE_API_KEY"\s*:\s*"([^"]+)""#).expect("api key pattern is valid")
    });
    if let Some(caps) = primary.captures(html) {
        return Ok(caps[1].to_string());
    }

    let fallback = FALLBACK.get_or_init(|| {
        Regex::new(r#"innertubeApiKey\s*[=:]\s*"([^"]+)""#).expect("api key pattern is valid")
    });
    if let Some(caps) = fallback.captures(html) {
        return Ok(caps[1].to_string());
    }

    Err(Error::TranscriptUnavailable(
        "could not extract InnerTube API key from watch page".to_string(),
    ))
}

fn track_list(response: PlayerResponse, video_id: &str) -> Result<TrackList> {
    if let Some(status) = response.playability_status {
        if status.status != "OK" {
            return Err(Error::TranscriptUnavailable(format!(
                "video {} is not playable ({}): {}",
                video_id,
                status.status,
                status.reason.unwrap_or_default()
            )));
        }
    }

    let Some(renderer) = response
        .captions
        .and_then(|c| c.player_captions_tracklist_renderer)
    else {
        return Ok(TrackList::default());
    };

    let default_index = renderer
        .audio_tracks
        .get(renderer.default_audio_track_index.unwrap_or(0))
        .and_then(|audio| audio.default_caption_track_index);

    let default_language = default_index
        .and_then(|i| renderer.caption_tracks.get(i))
        .map(|t| t.language_code.clone());

    let tracks = renderer
        .caption_tracks
        .into_iter()
        .map(|t| CaptionTrack {
            is_generated: t.kind.as_deref() == Some("asr"),
            name: t
                .name
                .map(TrackName::into_text)
                .unwrap_or_else(|| t.language_code.clone()),
            language_code: t.language_code,
            base_url: t.base_url.replace("&fmt=srv3", ""),
        })
        .collect();

    Ok(TrackList {
        tracks,
        default_language,
    })
}

/// Parse caption XML in either the legacy `<text start dur>` format (seconds)
/// or the timedtext `<p t d>` format (milliseconds).
fn parse_caption_xml(xml: &str) -> Result<Vec<CaptionEntry>> {
    let mut reader = Reader::from_str(xml);
    let mut entries = Vec::new();
    let mut current: Option<(f64, f64, String)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"text" | b"p" => {
                    let millis = e.name().as_ref() == b"p";
                    let (start_key, dur_key) = if millis {
                        (&b"t"[..], &b"d"[..])
                    } else {
                        (&b"start"[..], &b"dur"[..])
                    };
                    let mut start = 0.0;
                    let mut duration = 0.0;
                    for attr in e.attributes().flatten() {
                        let value = String::from_utf8_lossy(&attr.value).parse::<f64>().ok();
                        if attr.key.as_ref() == start_key {
                            start = value.unwrap_or_default();
                        } else if attr.key.as_ref() == dur_key {
                            duration = value.unwrap_or_default();
                        }
                    }
                    if millis {
                        start /= 1000.0;
                        duration /= 1000.0;
                    }
                    current = Some((start, duration, String::new()));
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if let Some((_, _, text)) = current.as_mut() {
                    let raw = e
                        .unescape()
                        .map_err(|e| Error::TranscriptUnavailable(format!("bad caption text: {}", e)))?;
                    text.push_str(&html_escape::decode_html_entities(&raw));
                }
            }
            Ok(Event::End(ref e)) if matches!(e.name().as_ref(), b"text" | b"p") => {
                if let Some((start, duration, text)) = current.take() {
                    let text = text.replace('\n', " ").trim().to_string();
                    if !text.is_empty() {
                        entries.push(CaptionEntry {
                            text,
                            start,
                            duration,
                        });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::TranscriptUnavailable(format!(
                    "error parsing caption XML: {}",
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(entries)
}
