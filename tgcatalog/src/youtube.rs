//! HTTP client for the YouTube Data API v3
//!
//! Provides the two catalog operations the gateway exposes: free-text video
//! search and the most-popular music chart. Both normalize the provider
//! response into [`CatalogItem`] records.
//!
//! # Example
//!
//! ```no_run
//! use tgcatalog::YouTubeClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = YouTubeClient::builder()
//!     .api_key("AIza...".to_string())
//!     .build()?;
//!
//! let items = client.search("miles davis").await?;
//! for item in items {
//!     println!("{} ({})", item.title, item.id);
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use crate::models::CatalogItem;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default YouTube Data API base URL
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "TuneGate/0.1 (tgcatalog)";

/// Result-count cap for search and trending requests
const MAX_RESULTS: &str = "15";

/// Region used for the trending chart
const TRENDING_REGION: &str = "US";

/// YouTube category id for Music
const TRENDING_CATEGORY: &str = "10";

/// YouTube Data API client
///
/// The client is stateless and performs exactly one outbound call per
/// operation; no retries, no caching.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl YouTubeClient {
    /// Create a builder for configuring the client
    pub fn builder() -> YouTubeClientBuilder {
        YouTubeClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search videos by free-text query, normalized to [`CatalogItem`]s.
    ///
    /// Fails with [`Error::MissingCredential`] before any outbound call if
    /// no API key is configured.
    pub async fn search(&self, query: &str) -> Result<Vec<CatalogItem>> {
        let key = self.require_key()?;

        let mut url = Url::parse(&format!("{}/search", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("part", "snippet")
            .append_pair("type", "video")
            .append_pair("maxResults", MAX_RESULTS)
            .append_pair("q", query)
            .append_pair("key", key);

        debug!("YouTube search: {:?}", query);
        let response: SearchResponse = self.get_json(url).await?;
        Ok(map_search(response))
    }

    /// Fetch the most-popular music chart, normalized to [`CatalogItem`]s.
    pub async fn trending(&self) -> Result<Vec<CatalogItem>> {
        let key = self.require_key()?;

        let mut url = Url::parse(&format!("{}/videos", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("part", "snippet")
            .append_pair("chart", "mostPopular")
            .append_pair("regionCode", TRENDING_REGION)
            .append_pair("videoCategoryId", TRENDING_CATEGORY)
            .append_pair("maxResults", MAX_RESULTS)
            .append_pair("key", key);

        debug!("YouTube trending chart");
        let response: VideosResponse = self.get_json(url).await?;
        Ok(map_videos(response))
    }

    fn require_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or(Error::MissingCredential("YouTube"))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.client.get(url).timeout(self.timeout).send().await?;

        if !response.status().is_success() {
            return Err(Error::api(format!(
                "YouTube API returned status: {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

/// Builder for configuring a [`YouTubeClient`]
#[derive(Debug, Default)]
pub struct YouTubeClientBuilder {
    client: Option<Client>,
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl YouTubeClientBuilder {
    /// Set a custom HTTP client (shares connection pools)
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the API base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<YouTubeClient> {
        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .user_agent(DEFAULT_USER_AGENT)
                .timeout(timeout)
                .build()?,
        };

        Ok(YouTubeClient {
            client,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: self.api_key,
            timeout,
        })
    }
}

// ============================================================================
// Provider response shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: SearchItemId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Default, Deserialize)]
struct SearchItemId {
    #[serde(default, rename = "videoId")]
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    #[serde(default)]
    id: String,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Default, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
    #[serde(default, rename = "channelTitle")]
    channel_title: String,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    #[serde(default)]
    medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    #[serde(default)]
    url: String,
}

impl Snippet {
    /// Medium thumbnail URL, degrading to an empty string when absent
    fn thumbnail_url(&self) -> String {
        self.thumbnails
            .medium
            .as_ref()
            .map(|t| t.url.clone())
            .unwrap_or_default()
    }
}

fn map_search(response: SearchResponse) -> Vec<CatalogItem> {
    response
        .items
        .into_iter()
        .map(|item| {
            let thumbnail = item.snippet.thumbnail_url();
            CatalogItem::new(
                item.id.video_id,
                item.snippet.title,
                thumbnail,
                item.snippet.channel_title,
            )
        })
        .collect()
}

fn map_videos(response: VideosResponse) -> Vec<CatalogItem> {
    response
        .items
        .into_iter()
        .map(|item| {
            let thumbnail = item.snippet.thumbnail_url();
            CatalogItem::new(
                item.id,
                item.snippet.title,
                thumbnail,
                item.snippet.channel_title,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn search_json() -> serde_json::Value {
        json!({
            "items": [
                {
                    "id": { "videoId": "dQw4w9WgXcQ" },
                    "snippet": {
                        "title": "Test Video",
                        "thumbnails": {
                            "medium": { "url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/mq.jpg" }
                        },
                        "channelTitle": "Test Channel"
                    }
                },
                {
                    "id": { "videoId": "abc123" },
                    "snippet": {
                        "title": "No Thumbnail",
                        "thumbnails": {},
                        "channelTitle": "Other Channel"
                    }
                }
            ]
        })
    }

    #[test]
    fn test_map_search() {
        let response: SearchResponse = serde_json::from_value(search_json()).unwrap();
        let items = map_search(response);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "dQw4w9WgXcQ");
        assert_eq!(items[0].title, "Test Video");
        assert_eq!(items[0].thumbnail, "https://i.ytimg.com/vi/dQw4w9WgXcQ/mq.jpg");
        assert_eq!(items[0].channel, "Test Channel");
    }

    #[test]
    fn test_missing_thumbnail_degrades_to_empty_string() {
        let response: SearchResponse = serde_json::from_value(search_json()).unwrap();
        let items = map_search(response);
        assert_eq!(items[1].thumbnail, "");
    }

    #[test]
    fn test_missing_thumbnails_object_entirely() {
        let response: SearchResponse = serde_json::from_value(json!({
            "items": [
                { "id": { "videoId": "x" }, "snippet": { "title": "t", "channelTitle": "c" } }
            ]
        }))
        .unwrap();
        let items = map_search(response);
        assert_eq!(items[0].thumbnail, "");
    }

    #[test]
    fn test_map_videos_uses_plain_id() {
        let response: VideosResponse = serde_json::from_value(json!({
            "items": [
                {
                    "id": "vid42",
                    "snippet": {
                        "title": "Trending",
                        "thumbnails": { "medium": { "url": "https://img/mq.jpg" } },
                        "channelTitle": "Chart Channel"
                    }
                }
            ]
        }))
        .unwrap();
        let items = map_videos(response);
        assert_eq!(items[0].id, "vid42");
        assert_eq!(items[0].thumbnail, "https://img/mq.jpg");
    }

    #[test]
    fn test_empty_items() {
        let response: SearchResponse = serde_json::from_value(json!({})).unwrap();
        assert!(map_search(response).is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_fails_locally() {
        let client = YouTubeClient::builder().build().unwrap();
        let err = client.search("anything").await.unwrap_err();
        assert!(err.is_missing_credential());
    }
}
