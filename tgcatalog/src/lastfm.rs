//! HTTP client for the Last.fm web API
//!
//! Provides the two chart operations the gateway exposes: country top
//! artists (`geo.gettopartists`) and tag top tracks (`tag.gettoptracks`).
//! Responses normalize to [`Artist`] and [`TagTrack`] records; a missing
//! image array degrades to an empty string, never an error.

use crate::error::{Error, Result};
use crate::models::{Artist, TagTrack};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default Last.fm API base URL
pub const DEFAULT_BASE_URL: &str = "http://ws.audioscrobbler.com/2.0/";

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Country used when the caller supplies none
pub const DEFAULT_COUNTRY: &str = "Kenya";

/// Result-count cap for the artist chart
const ARTIST_LIMIT: &str = "20";

/// Result-count cap for tag track charts
const TRACK_LIMIT: &str = "12";

/// Index of the "large" entry in Last.fm image arrays
const IMAGE_INDEX: usize = 2;

/// Last.fm API client
///
/// Stateless; one outbound call per operation, no retries, no caching.
#[derive(Debug, Clone)]
pub struct LastFmClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl LastFmClient {
    /// Create a builder for configuring the client
    pub fn builder() -> LastFmClientBuilder {
        LastFmClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether an API key is configured
    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Top artists for a country ([`DEFAULT_COUNTRY`] when `None`).
    pub async fn top_artists(&self, country: Option<&str>) -> Result<Vec<Artist>> {
        let key = self.require_key()?;
        let country = country.unwrap_or(DEFAULT_COUNTRY);

        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("method", "geo.gettopartists")
            .append_pair("country", country)
            .append_pair("api_key", key)
            .append_pair("format", "json")
            .append_pair("limit", ARTIST_LIMIT);

        debug!("Last.fm top artists for {}", country);
        let response: TopArtistsResponse = self.get_json(url).await?;
        Ok(map_artists(response))
    }

    /// Top tracks for a tag (genre or playlist name).
    pub async fn tag_tracks(&self, tag: &str) -> Result<Vec<TagTrack>> {
        let key = self.require_key()?;

        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("method", "tag.gettoptracks")
            .append_pair("tag", tag)
            .append_pair("api_key", key)
            .append_pair("format", "json")
            .append_pair("limit", TRACK_LIMIT);

        debug!("Last.fm top tracks for tag {:?}", tag);
        let response: TagTracksResponse = self.get_json(url).await?;
        Ok(map_tracks(response))
    }

    fn require_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or(Error::MissingCredential("Last.fm"))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.client.get(url).timeout(self.timeout).send().await?;

        if !response.status().is_success() {
            return Err(Error::api(format!(
                "Last.fm API returned status: {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

/// Builder for configuring a [`LastFmClient`]
#[derive(Debug, Default)]
pub struct LastFmClientBuilder {
    client: Option<Client>,
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl LastFmClientBuilder {
    /// Set a custom HTTP client
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
    pub fn build(self) -> Result<LastFmClient> {
        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .user_agent(crate::youtube::DEFAULT_USER_AGENT)
                .timeout(timeout)
                .build()?,
        };

        Ok(LastFmClient {
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
struct TopArtistsResponse {
    #[serde(default)]
    topartists: TopArtists,
}

#[derive(Debug, Default, Deserialize)]
struct TopArtists {
    #[serde(default)]
    artist: Vec<ArtistEntry>,
}

#[derive(Debug, Deserialize)]
struct ArtistEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    image: Vec<ImageEntry>,
    #[serde(default)]
    url: String,
}

#[derive(Debug, Deserialize)]
struct TagTracksResponse {
    #[serde(default)]
    tracks: TagTracks,
}

#[derive(Debug, Default, Deserialize)]
struct TagTracks {
    #[serde(default)]
    track: Vec<TrackEntry>,
}

#[derive(Debug, Deserialize)]
struct TrackEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    artist: TrackArtist,
    #[serde(default)]
    image: Vec<ImageEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct TrackArtist {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct ImageEntry {
    #[serde(default, rename = "#text")]
    text: String,
}

/// Large image URL from a Last.fm image array, or empty string
fn large_image(images: &[ImageEntry]) -> String {
    images
        .get(IMAGE_INDEX)
        .map(|i| i.text.clone())
        .unwrap_or_default()
}

fn map_artists(response: TopArtistsResponse) -> Vec<Artist> {
    response
        .topartists
        .artist
        .into_iter()
        .map(|entry| Artist {
            image: large_image(&entry.image),
            name: entry.name,
            url: entry.url,
        })
        .collect()
}

fn map_tracks(response: TagTracksResponse) -> Vec<TagTrack> {
    response
        .tracks
        .track
        .into_iter()
        .map(|entry| TagTrack {
            image: large_image(&entry.image),
            title: entry.name,
            artist: entry.artist.name,
        })
        .collect()
}
