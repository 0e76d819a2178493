//! Shared, read-only request state
//!
//! One clone per in-flight request; everything inside is either cheap to
//! clone or immutable configuration, so requests share no mutable state.

use anyhow::{Context, Result};
use tgcatalog::{LastFmClient, RadioBrowserClient, YouTubeClient};
use tgconfig::Config;
use tgextract::Extractor;

/// Injected collaborators of the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub youtube: YouTubeClient,
    pub lastfm: LastFmClient,
    pub radio: RadioBrowserClient,
    pub extractor: Extractor,
}

impl AppState {
    /// Build all clients from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = config.provider_timeout();

        let mut youtube = YouTubeClient::builder()
            .base_url(&config.providers.youtube.base_url)
            .timeout(timeout);
        if let Some(key) = &config.providers.youtube.api_key {
            youtube = youtube.api_key(key);
        }

        let mut lastfm = LastFmClient::builder()
            .base_url(&config.providers.lastfm.base_url)
            .timeout(timeout);
        if let Some(key) = &config.providers.lastfm.api_key {
            lastfm = lastfm.api_key(key);
        }

        let radio = RadioBrowserClient::builder()
            .base_url(&config.providers.radio_browser.base_url)
            .timeout(timeout);

        Ok(Self {
            youtube: youtube.build().context("Failed to build YouTube client")?,
            lastfm: lastfm.build().context("Failed to build Last.fm client")?,
            radio: radio.build().context("Failed to build Radio Browser client")?,
            extractor: Extractor::new(&config.extractor.tool),
        })
    }
}
