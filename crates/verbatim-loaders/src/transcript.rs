use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// A timed unit of caption text. Timing fields are carried through as
/// returned by the service; loaders only read `text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    /// Offset from the start of the video, in seconds.
    pub start: f64,
    /// Display duration of the segment, in seconds.
    pub duration: f64,
}

/// Errors reported by a transcript source.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("could not extract a video id from {0:?}")]
    InvalidVideoId(String),
    #[error("transcript request failed: {0}")]
    Http(String),
    #[error("transcript response was not valid json3: {0}")]
    Parse(String),
    #[error("no transcript available for video {0}")]
    Unavailable(String),
    /// Any other failure reported by the transcript service, verbatim.
    #[error("{0}")]
    Service(String),
}

/// A source of transcript segments for a video given by URL or bare id.
///
/// [`YoutubeLoader`](crate::YoutubeLoader) talks to its transcript source
/// through this trait, so tests can substitute a canned implementation.
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Fetch the ordered transcript segments for a video. `language` is a
    /// preferred caption language code; `None` means the source's default.
    async fn fetch_transcript(
        &self,
        url_or_id: &str,
        language: Option<&str>,
    ) -> Result<Vec<TranscriptSegment>, TranscriptError>;
}

/// Transcript source backed by YouTube's `timedtext` endpoint.
pub struct TimedTextClient {
    client: reqwest::Client,
}

impl TimedTextClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for TimedTextClient {
    fn default() -> Self {
        Self::new()
    }
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?:youtube\.com/(?:watch\?(?:.*&)?v=|embed/|shorts/|v/)|youtu\.be/)([A-Za-z0-9_-]{11})",
        )
        .expect("video url pattern")
    })
}

/// Extract the 11-character video id from a watch/share/embed/shorts URL,
/// or accept a bare id as-is.
pub fn extract_video_id(url_or_id: &str) -> Option<String> {
    let trimmed = url_or_id.trim();
    if trimmed.len() == 11
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Some(trimmed.to_string());
    }
    url_pattern()
        .captures(trimmed)
        .map(|caps| caps[1].to_string())
}

/// Parse a `timedtext` json3 payload into ordered segments.
///
/// Events without caption text (json3 interleaves newline-only spacer
/// events) are skipped. A payload with no `events` array parses to an
/// empty vector.
pub fn parse_timed_text(body: &Value) -> Vec<TranscriptSegment> {
    let Some(events) = body["events"].as_array() else {
        return Vec::new();
    };
    events
        .iter()
        .filter_map(|event| {
            let segs = event["segs"].as_array()?;
            let text = segs
                .iter()
                .filter_map(|seg| seg["utf8"].as_str())
                .collect::<Vec<_>>()
                .join("");
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(TranscriptSegment {
                text: text.to_string(),
                start: event["tStartMs"].as_f64().unwrap_or_default() / 1000.0,
                duration: event["dDurMs"].as_f64().unwrap_or_default() / 1000.0,
            })
        })
        .collect()
}

#[async_trait]
impl TranscriptFetcher for TimedTextClient {
    async fn fetch_transcript(
        &self,
        url_or_id: &str,
        language: Option<&str>,
    ) -> Result<Vec<TranscriptSegment>, TranscriptError> {
        let video_id = extract_video_id(url_or_id)
            .ok_or_else(|| TranscriptError::InvalidVideoId(url_or_id.to_string()))?;
        let lang = language.unwrap_or("en");
        let url = format!(
            "https://www.youtube.com/api/timedtext?v={}&lang={}&fmt=json3",
            video_id, lang
        );
        debug!(video_id = %video_id, lang = %lang, "fetching timedtext transcript");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TranscriptError::Http(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(TranscriptError::Service(format!(
                "transcript endpoint returned status {}",
                resp.status()
            )));
        }
        let body = resp
            .text()
            .await
            .map_err(|e| TranscriptError::Http(e.to_string()))?;
        // The endpoint answers an empty 200 when the video has no caption
        // track in the requested language.
        if body.trim().is_empty() {
            return Err(TranscriptError::Unavailable(video_id));
        }
        let parsed: Value =
            serde_json::from_str(&body).map_err(|e| TranscriptError::Parse(e.to_string()))?;
        Ok(parse_timed_text(&parsed))
    }
}
