//! HTTP client for the Radio Browser station directory
//!
//! A single operation: list stations, optionally filtered by country.
//! Radio Browser requires no credential.

use crate::error::{Error, Result};
use crate::models::Station;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default Radio Browser base URL
pub const DEFAULT_BASE_URL: &str = "https://de1.api.radio-browser.info";

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Result-count cap for station listings
const STATION_LIMIT: &str = "30";

/// Radio Browser directory client
#[derive(Debug, Clone)]
pub struct RadioBrowserClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl RadioBrowserClient {
    /// Create a builder for configuring the client
    pub fn builder() -> RadioBrowserClientBuilder {
        RadioBrowserClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List working stations, optionally restricted to one country.
    pub async fn stations(&self, country: Option<&str>) -> Result<Vec<Station>> {
        let mut url = Url::parse(&format!("{}/json/stations", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("hidebroken", "true")
            .append_pair("limit", STATION_LIMIT);
        if let Some(country) = country {
            url.query_pairs_mut().append_pair("country", country);
        }

        debug!("Radio Browser stations, country={:?}", country);
        let response = self.client.get(url).timeout(self.timeout).send().await?;

        if !response.status().is_success() {
            return Err(Error::api(format!(
                "Radio Browser API returned status: {}",
                response.status()
            )));
        }

        let entries: Vec<StationEntry> = response.json().await?;
        Ok(entries.into_iter().map(map_station).collect())
    }
}

/// Builder for configuring a [`RadioBrowserClient`]
#[derive(Debug, Default)]
pub struct RadioBrowserClientBuilder {
    client: Option<Client>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl RadioBrowserClientBuilder {
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

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<RadioBrowserClient> {
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

        Ok(RadioBrowserClient {
            client,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout,
        })
    }
}

// ============================================================================
// Provider response shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct StationEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    favicon: String,
    #[serde(default)]
    url_resolved: String,
}

fn map_station(entry: StationEntry) -> Station {
    Station {
        name: entry.name,
        country: entry.country,
        favicon: entry.favicon,
        url: entry.url_resolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_station() {
        let entries: Vec<StationEntry> = serde_json::from_value(json!([
            {
                "name": "SomaFM Groove Salad",
                "country": "The United States Of America",
                "favicon": "https://somafm.com/favicon.ico",
                "url_resolved": "https://ice1.somafm.com/groovesalad-128-mp3",
                "codec": "MP3",
                "bitrate": 128
            },
            { "name": "Bare Station" }
        ]))
        .unwrap();

        let stations: Vec<Station> = entries.into_iter().map(map_station).collect();
        assert_eq!(stations[0].name, "SomaFM Groove Salad");
        assert_eq!(stations[0].url, "https://ice1.somafm.com/groovesalad-128-mp3");
        // Missing fields degrade to empty strings
        assert_eq!(stations[1].favicon, "");
        assert_eq!(stations[1].url, "");
    }
}
