use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use super::VideoId;
use crate::config::TranscriptConfig;
use crate::{DigestError, Result};

/// One timed caption line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Caption text
    pub text: String,

    /// Start offset in seconds
    pub start: f64,

    /// Duration in seconds, when the track carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// Caption segments of a video in playback order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Caption language, when known
    pub language: Option<String>,

    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    pub fn new(segments: Vec<TranscriptSegment>) -> Self {
        Self {
            language: None,
            segments,
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Offset at which the last caption ends
    pub fn covered_seconds(&self) -> f64 {
        self.segments
            .last()
            .map(|s| s.start + s.duration.unwrap_or(0.0))
            .unwrap_or(0.0)
    }
}

/// Source of video transcripts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the full transcript of a video
    async fn fetch(&self, video_id: &VideoId) -> Result<Transcript>;
}

/// Transcript source backed by yt-dlp's subtitle download
pub struct YtDlpTranscriptSource {
    yt_dlp_path: String,
    languages: Vec<String>,
}

impl YtDlpTranscriptSource {
    pub fn new(config: &TranscriptConfig) -> Self {
        Self {
            yt_dlp_path: config.yt_dlp_path.clone(),
            languages: config.languages.clone(),
        }
    }

    /// Ask yt-dlp to write the caption tracks of a video into `dir`
    async fn download_captions(&self, video_id: &VideoId, dir: &Path) -> std::result::Result<(), String> {
        let output_template = dir.join("%(id)s.%(ext)s").to_string_lossy().into_owned();
        let languages = self.languages.join(",");
        let watch_url = video_id.watch_url();

        tracing::debug!("Downloading captions for {} with {}", video_id, self.yt_dlp_path);

        let output = Command::new(&self.yt_dlp_path)
            .args([
                "--skip-download",
                "--write-subs",
                "--write-auto-subs",
                "--sub-format",
                "json3",
                "--sub-langs",
                languages.as_str(),
                "--no-playlist",
                "--no-warnings",
                "--output",
                output_template.as_str(),
                watch_url.as_str(),
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| format!("could not run {}: {}", self.yt_dlp_path, e))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(format!("yt-dlp failed: {}", error.trim()));
        }

        Ok(())
    }
}

#[async_trait]
impl TranscriptSource for YtDlpTranscriptSource {
    async fn fetch(&self, video_id: &VideoId) -> Result<Transcript> {
        let unavailable = |reason: String| DigestError::TranscriptUnavailable {
            video_id: video_id.to_string(),
            reason,
        };

        let temp_dir = tempfile::tempdir().map_err(|e| unavailable(format!("could not create temp dir: {}", e)))?;

        self.download_captions(video_id, temp_dir.path())
            .await
            .map_err(unavailable)?;

        let tracks = list_caption_tracks(temp_dir.path(), video_id).map_err(|e| unavailable(e.to_string()))?;
        let (language, path) = select_caption_track(tracks, &self.languages)
            .ok_or_else(|| unavailable("no captions available".to_string()))?;

        tracing::debug!("Using {} caption track {}", language, path.display());

        let content = fs_err::read_to_string(&path).map_err(|e| unavailable(e.to_string()))?;
        let segments =
            parse_json3(&content).map_err(|e| unavailable(format!("unreadable caption track: {}", e)))?;

        let transcript = Transcript {
            language: Some(language),
            segments,
        };
        if transcript.is_empty() {
            return Err(unavailable("caption track is empty".to_string()));
        }

        Ok(transcript)
    }
}

/// Caption files yt-dlp wrote for a video, keyed by language code
fn list_caption_tracks(dir: &Path, video_id: &VideoId) -> std::io::Result<Vec<(String, PathBuf)>> {
    let prefix = format!("{}.", video_id);
    let mut tracks = Vec::new();

    for entry in fs_err::read_dir(dir)?.flatten() {
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if let Some(language) = file_name
            .strip_prefix(&prefix)
            .and_then(|rest| rest.strip_suffix(".json3"))
        {
            tracks.push((language.to_string(), entry.path()));
        }
    }

    tracks.sort();
    Ok(tracks)
}

/// Pick the first track in preference order, else the first one found
fn select_caption_track(mut tracks: Vec<(String, PathBuf)>, languages: &[String]) -> Option<(String, PathBuf)> {
    let preferred = languages
        .iter()
        .find_map(|lang| tracks.iter().position(|(track_lang, _)| track_lang == lang));

    match preferred {
        Some(index) => Some(tracks.swap_remove(index)),
        None => tracks.into_iter().next(),
    }
}

#[derive(Debug, Deserialize)]
struct Json3Captions {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    d_duration_ms: Option<u64>,
    #[serde(default)]
    segs: Vec<Json3Seg>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Convert a json3 caption track into transcript segments
pub fn parse_json3(content: &str) -> serde_json::Result<Vec<TranscriptSegment>> {
    let captions: Json3Captions = serde_json::from_str(content)?;

    let segments = captions
        .events
        .into_iter()
        .filter_map(|event| {
            let raw: String = event.segs.iter().map(|seg| seg.utf8.as_str()).collect();
            let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return None;
            }

            Some(TranscriptSegment {
                text,
                start: event.t_start_ms as f64 / 1000.0,
                duration: event.d_duration_ms.map(|ms| ms as f64 / 1000.0),
            })
        })
        .collect();

    Ok(segments)
}
