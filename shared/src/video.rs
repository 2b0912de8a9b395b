//! Video identifier extraction from YouTube URLs.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::{Error, Result};

static WATCH_URL: OnceLock<Regex> = OnceLock::new();
static SHORT_URL: OnceLock<Regex> = OnceLock::new();
static REGIONAL_HOST: OnceLock<Regex> = OnceLock::new();

fn watch_url() -> &'static Regex {
    WATCH_URL.get_or_init(|| {
        Regex::new(
            r"(?i)^(?:https?://)?(?:www\.|m\.)?youtube\.(?:com|co\.[a-z]{2}|com\.[a-z]{2}|[a-z]{2})/watch/?\?(?:[^#]*&)?v=([A-Za-z0-9_-]+)",
        )
        .expect("watch URL pattern is valid")
    })
}

fn short_url() -> &'static Regex {
    SHORT_URL.get_or_init(|| {
        Regex::new(r"(?i)^(?:https?://)?(?:www\.)?youtu\.be/([A-Za-z0-9_-]+)")
            .expect("short URL pattern is valid")
    })
}

fn regional_host() -> &'static Regex {
    REGIONAL_HOST.get_or_init(|| {
        Regex::new(r"^youtube\.(?:com|co\.[a-z]{2}|com\.[a-z]{2}|[a-z]{2})$")
            .expect("regional host pattern is valid")
    })
}

/// Extract the video identifier from a YouTube URL.
///
/// Accepts long-form `watch?v=` links on any regional YouTube host, short
/// `youtu.be/` links, and embed/shorts/live paths. Query parameters and
/// fragments after the identifier are never part of the result.
pub fn extract_video_id(input: &str) -> Result<String> {
    let input = input.trim();

    if let Some(caps) = watch_url().captures(input) {
        return Ok(caps[1].to_string());
    }

    if let Some(caps) = short_url().captures(input) {
        return Ok(caps[1].to_string());
    }

    from_parsed_url(input).ok_or(Error::InvalidUrl)
}

fn from_parsed_url(input: &str) -> Option<String> {
    let url = if input.contains("://") {
        Url::parse(input).ok()?
    } else {
        Url::parse(&format!("https://{}", input)).ok()?
    };

    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }

    let host = url.host_str()?.to_ascii_lowercase();
    let host = host
        .strip_prefix("www.")
        .or_else(|| host.strip_prefix("m."))
        .unwrap_or(&host);

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let candidate = if host == "youtu.be" {
        segments.next().map(str::to_string)
    } else if regional_host().is_match(host) || host == "youtube-nocookie.com" {
        match url.query_pairs().find(|(k, _)| k == "v") {
            Some((_, v)) => Some(v.into_owned()),
            None => match segments.next() {
                Some("embed" | "shorts" | "live" | "v") => segments.next().map(str::to_string),
                _ => None,
            },
        }
    } else {
        None
    };

    candidate.filter(|id| is_valid_id(id))
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
