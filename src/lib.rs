//! yt-digest - A Rust CLI tool for summarizing YouTube videos
//!
//! This library resolves a video reference, pulls its captions and oEmbed metadata,
//! asks a language model for a summary and writes the answer to a Markdown or HTML file.

use std::path::PathBuf;

pub mod cli;
pub mod config;
pub mod output;
pub mod summarize;
pub mod utils;
pub mod youtube;

#[cfg(test)]
pub(crate) mod test_support;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use summarize::{LanguageModel, SummaryPipeline, SummaryRequest};
pub use youtube::{MetadataSource, Transcript, TranscriptSegment, TranscriptSource, VideoId, VideoMetadata};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, DigestError>;

/// Error types specific to the digest pipeline
#[derive(thiserror::Error, Debug)]
pub enum DigestError {
    #[error("Could not extract video ID from: {input}")]
    InvalidReference { input: String },

    #[error("Failed to fetch transcript for video {video_id}: {reason}")]
    TranscriptUnavailable { video_id: String, reason: String },

    #[error("Failed to fetch metadata for video {video_id}: {reason}")]
    MetadataUnavailable { video_id: String, reason: String },

    #[error("Failed to write {}", path.display())]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },

    #[error("Model request failed: {reason}")]
    ModelFailed { reason: String },
}
