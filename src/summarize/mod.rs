use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

pub mod model;
pub mod prompt;

pub use model::{ChatCompletionsModel, LanguageModel, Provider, ProviderConfig};
pub use prompt::build_prompt;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::output;
use crate::utils::format_duration;
use crate::youtube::metadata::fetch_or_placeholder;
use crate::youtube::{MetadataSource, OembedClient, TranscriptSource, VideoId, YtDlpTranscriptSource};
use crate::Result;

/// A single summarization job
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    pub video_id: VideoId,

    /// Explicit output path; derived from the title when `None`
    pub output: Option<PathBuf>,

    pub format: OutputFormat,
}

/// Main summarization pipeline
pub struct SummaryPipeline {
    transcripts: Box<dyn TranscriptSource>,
    metadata: Box<dyn MetadataSource>,
    model: Box<dyn LanguageModel>,
    output_dir: Option<PathBuf>,
    show_progress: bool,
}

impl SummaryPipeline {
    /// Create a pipeline wired to yt-dlp, oEmbed and the configured model
    pub fn new(config: &Config, model_override: Option<&str>) -> anyhow::Result<Self> {
        let metadata = OembedClient::new(&config.metadata).context("Failed to create HTTP client")?;
        let model = ChatCompletionsModel::from_config(config, model_override)?;

        tracing::debug!("Using model {} at {}", model.model(), config.api_url());

        Ok(Self::with_sources(
            Box::new(YtDlpTranscriptSource::new(&config.transcript)),
            Box::new(metadata),
            Box::new(model),
        )
        .output_dir(config.app.output_dir.clone()))
    }

    pub fn with_sources(
        transcripts: Box<dyn TranscriptSource>,
        metadata: Box<dyn MetadataSource>,
        model: Box<dyn LanguageModel>,
    ) -> Self {
        Self {
            transcripts,
            metadata,
            model,
            output_dir: None,
            show_progress: true,
        }
    }

    /// Directory that derived output filenames are placed in
    pub fn output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.output_dir = dir;
        self
    }

    /// Hide the progress spinner
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.show_progress = !quiet;
        self
    }

    /// Summarize a video and return the path the summary was written to
    pub async fn run(&self, request: &SummaryRequest) -> Result<PathBuf> {
        let video_id = &request.video_id;

        tracing::info!("Fetching metadata for video {}", video_id);
        let metadata = fetch_or_placeholder(self.metadata.as_ref(), video_id).await;
        let title = metadata.title_or_default(video_id);

        tracing::info!("Fetching transcript for video {}", video_id);
        let transcript = self.transcripts.fetch(video_id).await?;
        tracing::info!(
            "Fetched {} transcript segments covering {}",
            transcript.len(),
            format_duration(transcript.covered_seconds())
        );

        let prompt = build_prompt(&transcript, &metadata, video_id, request.format);

        let progress = self.spinner("Generating summary with AI...");
        let summary = match self.model.prompt(&prompt).await {
            Ok(summary) => {
                progress.finish_and_clear();
                summary
            }
            Err(e) => {
                progress.abandon_with_message("Summary generation failed");
                return Err(e);
            }
        };

        let path = match &request.output {
            Some(path) => path.clone(),
            None => {
                let file_name = output::default_output_path(&title, video_id, request.format);
                match &self.output_dir {
                    Some(dir) => dir.join(file_name),
                    None => file_name,
                }
            }
        };

        output::write_summary(&path, &summary)?;
        tracing::info!("Summary for {} saved to {}", video_id, path.display());

        Ok(path)
    }

    fn spinner(&self, message: &str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
            progress.set_style(style);
        }
        progress.set_message(message.to_string());
        progress.enable_steady_tick(Duration::from_millis(100));
        progress
    }
}
