use regex::Regex;
use std::sync::LazyLock;

pub mod metadata;
pub mod transcript;

pub use metadata::{MetadataSource, OembedClient, VideoMetadata};
pub use transcript::{Transcript, TranscriptSegment, TranscriptSource, YtDlpTranscriptSource};

use crate::{DigestError, Result};

/// Length of a YouTube video identifier
pub const VIDEO_ID_LEN: usize = 11;

static URL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([a-zA-Z0-9_-]{11})",
        r"youtube\.com/(?:shorts|live|v)/([a-zA-Z0-9_-]{11})",
        r"[?&]v=([a-zA-Z0-9_-]{11})",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("video URL pattern is valid"))
    .collect()
});

/// An 11-character YouTube video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Resolve a raw identifier or a YouTube URL into a video ID.
    ///
    /// Any 11-character input without a `/` is taken as an ID as-is; it is not
    /// checked against the ID alphabet, so a bogus one surfaces at fetch time.
    pub fn parse(input: &str) -> Result<Self> {
        if input.chars().count() == VIDEO_ID_LEN && !input.contains('/') {
            return Ok(Self(input.to_string()));
        }

        URL_PATTERNS
            .iter()
            .find_map(|pattern| pattern.captures(input))
            .and_then(|captures| captures.get(1))
            .map(|id| Self(id.as_str().to_string()))
            .ok_or_else(|| DigestError::InvalidReference {
                input: input.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }

    /// Watch URL starting playback at the given offset in seconds
    pub fn watch_url_at(&self, seconds: impl std::fmt::Display) -> String {
        format!("{}&t={}s", self.watch_url(), seconds)
    }

    /// Embeddable player URL
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
