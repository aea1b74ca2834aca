use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::summarize::Provider;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language model backend
    pub model: ModelConfig,

    /// oEmbed metadata lookup
    pub metadata: MetadataConfig,

    /// Caption retrieval
    pub transcript: TranscriptConfig,

    /// Application settings
    pub app: AppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// OpenAI-compatible provider
    pub provider: Provider,

    /// Model name (provider default if not specified)
    pub model: Option<String>,

    /// Chat completions endpoint (provider default if not specified)
    pub api_url: Option<String>,

    /// Sampling temperature
    pub temperature: Option<f32>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// oEmbed endpoint, queried with the canonical watch URL
    pub oembed_endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// yt-dlp executable
    pub yt_dlp_path: String,

    /// Caption languages in order of preference
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory for summaries written under a derived filename
    pub output_dir: Option<PathBuf>,

    /// Format used when --format is not given
    pub default_format: OutputFormat,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: None,
            api_url: None,
            temperature: None,
            timeout_secs: 300,
        }
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            oembed_endpoint: "https://www.youtube.com/oembed".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            yt_dlp_path: "yt-dlp".to_string(),
            languages: vec!["en".to_string()],
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(config_path) if config_path.exists() => {
                tracing::debug!("Loading configuration from {}", config_path.display());
                Self::from_file(&config_path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Parse a configuration file
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = fs_err::read_to_string(path).context("Failed to read config file")?;
        Self::from_yaml(&content)
    }

    fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default configuration to the user config directory
    pub fn init() -> Result<PathBuf> {
        let config_path = Self::user_config_path().context("Could not determine config directory")?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(&Self::default()).context("Failed to serialize config")?;
        fs_err::write(&config_path, content).context("Failed to write config file")?;

        Ok(config_path)
    }

    /// Get configuration file path
    fn config_path() -> Option<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("yt-digest.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        Self::user_config_path()
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("yt-digest").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.transcript.languages.is_empty() {
            anyhow::bail!("At least one transcript language must be configured");
        }

        url::Url::parse(&self.metadata.oembed_endpoint)
            .with_context(|| format!("Invalid oEmbed endpoint: {}", self.metadata.oembed_endpoint))?;

        if let Some(api_url) = &self.model.api_url {
            url::Url::parse(api_url).with_context(|| format!("Invalid model API URL: {}", api_url))?;
        }

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Provider: {}", self.model.provider.name());
        println!("  Model: {}", self.model_name());
        println!("  API URL: {}", self.api_url());
        println!("  oEmbed Endpoint: {}", self.metadata.oembed_endpoint);
        println!("  yt-dlp: {}", self.transcript.yt_dlp_path);
        println!("  Languages: {}", self.transcript.languages.join(", "));
        if let Some(dir) = &self.app.output_dir {
            println!("  Output Directory: {}", dir.display());
        }
        println!("  Default Format: {}", self.app.default_format);
        match Self::config_path() {
            Some(path) if path.exists() => println!("  Loaded From: {}", path.display()),
            _ => println!("  Loaded From: built-in defaults"),
        }
    }

    /// Model name sent to the backend
    pub fn model_name(&self) -> &str {
        self.model.model.as_deref().unwrap_or_else(|| self.model.provider.config().model)
    }

    /// Chat completions endpoint
    pub fn api_url(&self) -> &str {
        self.model.api_url.as_deref().unwrap_or_else(|| self.model.provider.config().api_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml(
            "model:\n  provider: grok\n  model: grok-3-mini\napp:\n  default_format: html\n",
        )
        .unwrap();

        assert_eq!(config.model.provider, Provider::Grok);
        assert_eq!(config.model_name(), "grok-3-mini");
        assert_eq!(config.api_url(), Provider::Grok.config().api_url);
        assert_eq!(config.app.default_format, OutputFormat::Html);
        assert_eq!(config.metadata.oembed_endpoint, "https://www.youtube.com/oembed");
        assert_eq!(config.transcript.languages, vec!["en".to_string()]);
    }

    #[test]
    fn test_rejects_empty_languages() {
        assert!(Config::from_yaml("transcript:\n  languages: []\n").is_err());
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        assert!(Config::from_yaml("metadata:\n  oembed_endpoint: not a url\n").is_err());
    }

    #[test]
    fn test_default_round_trips_through_yaml() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.model.timeout_secs, 300);
        assert_eq!(config.model_name(), Provider::Openai.config().model);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs_err::write(&path, "transcript:\n  languages: [de, en]\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.transcript.languages, vec!["de".to_string(), "en".to_string()]);
        assert_eq!(config.transcript.yt_dlp_path, "yt-dlp");
    }
}
