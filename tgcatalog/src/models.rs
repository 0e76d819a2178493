//! Normalized record shapes produced by the catalog clients
//!
//! Every provider response is mapped into one of these shapes before it
//! leaves the adapter. The structs serialize with the gateway's wire field
//! names, so handlers can emit them verbatim as JSON arrays.

use serde::{Deserialize, Serialize};

/// Uniform track/video metadata record
///
/// `channel` holds the channel or artist name depending on the source.
/// Records are immutable once constructed and live only for one
/// request/response cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogItem {
    /// Opaque media identifier, usable with the extraction pipeline
    pub id: String,
    /// Display title
    pub title: String,
    /// Thumbnail URL; empty string when the provider supplied none
    pub thumbnail: String,
    /// Channel or artist name
    pub channel: String,
}

impl CatalogItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        thumbnail: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            thumbnail: thumbnail.into(),
            channel: channel.into(),
        }
    }
}

/// Radio-directory record
///
/// Kept distinct from [`CatalogItem`]: a station has no extractable media
/// identifier, only a directly playable stream URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Station {
    pub name: String,
    pub country: String,
    /// Station favicon URL; may be empty
    pub favicon: String,
    /// Resolved, directly playable stream URL
    pub url: String,
}

/// Top-artist chart record (Last.fm geo chart)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Artist {
    pub name: String,
    /// Artist image URL; empty string when the provider supplied none
    pub image: String,
    /// Provider page URL for the artist
    pub url: String,
}

/// Tag-chart track record (Last.fm tag top tracks)
///
/// A reduced [`CatalogItem`]: the tag chart carries no extractable
/// identifier, so only display fields survive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagTrack {
    pub title: String,
    pub artist: String,
    /// Cover image URL; empty string when the provider supplied none
    pub image: String,
}
