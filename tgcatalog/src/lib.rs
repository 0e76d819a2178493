//! # tgcatalog - Normalizing catalog clients
//!
//! One client per third-party metadata source, each mapping the provider's
//! response schema into the gateway's shared record shapes:
//!
//! - [`YouTubeClient`] — video search and trending music chart → [`CatalogItem`]
//! - [`RadioBrowserClient`] — station directory → [`Station`]
//! - [`LastFmClient`] — country artist chart → [`Artist`], tag track charts → [`TagTrack`]
//!
//! Every operation performs exactly one outbound HTTP call; there are no
//! retries and no caching. Providers whose credential is unset fail with
//! [`Error::MissingCredential`](error::Error::MissingCredential) before any
//! call leaves the process. Missing optional provider fields (thumbnails,
//! image arrays) degrade to empty strings, never errors.

pub mod error;
pub mod lastfm;
pub mod models;
pub mod radio;
pub mod youtube;

pub use error::{Error, Result};
pub use lastfm::LastFmClient;
pub use models::{Artist, CatalogItem, Station, TagTrack};
pub use radio::RadioBrowserClient;
pub use youtube::YouTubeClient;
