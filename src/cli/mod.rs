use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "yt-digest",
    about = "yt-digest - Summarize YouTube videos using AI",
    version,
    long_about = "Fetches the captions and metadata of a YouTube video, asks a language model for a wry, readable summary and saves it as Markdown or HTML."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators and informational logs
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize a YouTube video transcript using AI
    Summarize {
        /// YouTube video URL or video ID
        #[arg(value_name = "VIDEO")]
        video: String,

        /// Output file path (derived from the video title if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// LLM model to use for summarization
        #[arg(short, long, value_name = "NAME")]
        model: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, ignore_case = true)]
        format: Option<OutputFormat>,
    },

    /// Show or initialize the configuration file
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,

        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown document (.md)
    #[default]
    Markdown,
    /// HTML document (.html)
    Html,
}

impl OutputFormat {
    /// File extension used for summaries in this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Html => write!(f, "html"),
        }
    }
}
