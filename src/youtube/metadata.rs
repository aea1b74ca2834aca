use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::VideoId;
use crate::config::MetadataConfig;
use crate::{DigestError, Result};

/// oEmbed record for a video.
///
/// Only `title` is interpreted; everything the service sends beyond the
/// well-known fields is kept in `extra` and passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_height: Option<u32>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl VideoMetadata {
    /// Stand-in record used when the lookup fails
    pub fn placeholder(video_id: &VideoId) -> Self {
        Self {
            title: Some(placeholder_title(video_id)),
            ..Self::default()
        }
    }

    /// Video title, or `Video_<id>` when the record has none
    pub fn title_or_default(&self, video_id: &VideoId) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| placeholder_title(video_id))
    }
}

fn placeholder_title(video_id: &VideoId) -> String {
    format!("Video_{}", video_id)
}

/// Source of video metadata
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Look up metadata for a video
    async fn fetch(&self, video_id: &VideoId) -> Result<VideoMetadata>;
}

/// Fetch metadata, degrading to a placeholder record on any failure
pub async fn fetch_or_placeholder(source: &dyn MetadataSource, video_id: &VideoId) -> VideoMetadata {
    match source.fetch(video_id).await {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::warn!("{}; continuing with placeholder title", e);
            VideoMetadata::placeholder(video_id)
        }
    }
}

/// Metadata lookup against an oEmbed endpoint
pub struct OembedClient {
    client: Client,
    endpoint: String,
}

impl OembedClient {
    pub fn new(config: &MetadataConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.oembed_endpoint.clone(),
        })
    }

    /// Lookup URL for a video
    fn request_url(&self, video_id: &VideoId) -> std::result::Result<Url, url::ParseError> {
        Url::parse_with_params(
            &self.endpoint,
            &[("url", video_id.watch_url().as_str()), ("format", "json")],
        )
    }
}

#[async_trait]
impl MetadataSource for OembedClient {
    async fn fetch(&self, video_id: &VideoId) -> Result<VideoMetadata> {
        let unavailable = |reason: String| DigestError::MetadataUnavailable {
            video_id: video_id.to_string(),
            reason,
        };

        let url = self.request_url(video_id).map_err(|e| unavailable(e.to_string()))?;
        tracing::debug!("Fetching oEmbed metadata: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(unavailable(format!("HTTP {}", response.status())));
        }

        response
            .json::<VideoMetadata>()
            .await
            .map_err(|e| unavailable(format!("malformed response: {}", e)))
    }
}
