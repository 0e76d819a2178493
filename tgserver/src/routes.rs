//! Route handlers for the TuneGate HTTP surface
//!
//! Catalog endpoints follow one shape: validate locally, await the single
//! adapter call, serialize the normalized list verbatim. Streaming
//! endpoints spawn one extraction process, commit the headers, then hand
//! the relay stream to the response body.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tgcatalog::{Artist, CatalogItem, Station, TagTrack};
use tgextract::{Error as ExtractError, ExtractionMode, ExtractionRequest};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

/// Build the gateway router. All routes are anonymous by design.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/info", get(info_route))
        .route("/search", get(search))
        .route("/trending", get(trending))
        .route("/radio", get(radio))
        .route("/artists", get(artists))
        .route("/genre-tracks", get(genre_tracks))
        .route("/playlist-tracks", get(playlist_tracks))
        .route("/stream", get(stream_audio))
        .route("/download", get(download_audio))
        .route("/download-video", get(download_video))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ============================================================================
// Catalog endpoints
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CountryParams {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenreParams {
    genre: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistParams {
    playlist: Option<String>,
}

/// GET /info
async fn info_route() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "TuneGate",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /search?q=...
async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CatalogItem>>, ApiError> {
    let query = require(params.q, "Missing query")?;
    let items = state
        .youtube
        .search(&query)
        .await
        .map_err(|e| ApiError::from_catalog("YouTube API error", e))?;
    Ok(Json(items))
}

/// GET /trending
async fn trending(State(state): State<AppState>) -> Result<Json<Vec<CatalogItem>>, ApiError> {
    let items = state
        .youtube
        .trending()
        .await
        .map_err(|e| ApiError::from_catalog("YouTube API error", e))?;
    Ok(Json(items))
}

/// GET /radio?country=...
async fn radio(
    State(state): State<AppState>,
    Query(params): Query<CountryParams>,
) -> Result<Json<Vec<Station>>, ApiError> {
    let country = params.country.filter(|c| !c.is_empty());
    let stations = state
        .radio
        .stations(country.as_deref())
        .await
        .map_err(|e| ApiError::from_catalog("Radio API error", e))?;
    Ok(Json(stations))
}

/// GET /artists?country=...
async fn artists(
    State(state): State<AppState>,
    Query(params): Query<CountryParams>,
) -> Result<Json<Vec<Artist>>, ApiError> {
    let country = params.country.filter(|c| !c.is_empty());
    let artists = state
        .lastfm
        .top_artists(country.as_deref())
        .await
        .map_err(|e| ApiError::from_catalog("Last.fm API error", e))?;
    Ok(Json(artists))
}

/// GET /genre-tracks?genre=...
async fn genre_tracks(
    State(state): State<AppState>,
    Query(params): Query<GenreParams>,
) -> Result<Json<Vec<TagTrack>>, ApiError> {
    tag_tracks(&state, params.genre, "Missing genre").await
}

/// GET /playlist-tracks?playlist=...
///
/// Alias of the tag chart: a "playlist" here is a Last.fm tag.
async fn playlist_tracks(
    State(state): State<AppState>,
    Query(params): Query<PlaylistParams>,
) -> Result<Json<Vec<TagTrack>>, ApiError> {
    tag_tracks(&state, params.playlist, "Missing playlist").await
}

async fn tag_tracks(
    state: &AppState,
    tag: Option<String>,
    missing: &'static str,
) -> Result<Json<Vec<TagTrack>>, ApiError> {
    // Credential check precedes parameter validation, matching the
    // gateway's established wire behavior.
    if !state.lastfm.has_key() {
        return Err(ApiError::MissingCredential("Last.fm"));
    }
    let tag = require(tag, missing)?;
    let tracks = state
        .lastfm
        .tag_tracks(&tag)
        .await
        .map_err(|e| ApiError::from_catalog("Last.fm API error", e))?;
    Ok(Json(tracks))
}

fn require(value: Option<String>, missing: &'static str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingParam(missing))
}

// ============================================================================
// Streaming endpoints
// ============================================================================

#[derive(Debug, Deserialize)]
struct IdParams {
    id: Option<String>,
}

/// GET /stream?id=... — audio passthrough
async fn stream_audio(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> Result<Response, ApiError> {
    start_relay(&state, params.id, ExtractionMode::PassthroughAudio)
}

/// GET /download?id=... — audio transcoded to MP3, served as attachment
async fn download_audio(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> Result<Response, ApiError> {
    start_relay(&state, params.id, ExtractionMode::TranscodeAudio)
}

/// GET /download-video?id=... — MP4 video, served as attachment
async fn download_video(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> Result<Response, ApiError> {
    start_relay(&state, params.id, ExtractionMode::PassthroughVideo)
}

/// Spawn one extraction process and commit the response headers before any
/// body byte. Every failure past this point can only surface as a
/// truncated or closed stream.
fn start_relay(
    state: &AppState,
    id: Option<String>,
    mode: ExtractionMode,
) -> Result<Response, ApiError> {
    let id = id
        .filter(|i| !i.is_empty())
        .ok_or(ApiError::MissingParam("Missing video id"))?;

    let request = ExtractionRequest::new(id, mode);
    let extraction = state.extractor.spawn(&request).map_err(|e| {
        match &e {
            ExtractError::EmptyMediaId => {} // filtered above
            other => error!("Extraction spawn failed: {}", other),
        }
        ApiError::Spawn
    })?;

    info!(
        "Streaming {:?} for media {:?} (pid {:?})",
        mode,
        request.media_id,
        extraction.pid()
    );

    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mode.content_type());
    if let Some(disposition) = mode.content_disposition() {
        response = response.header(header::CONTENT_DISPOSITION, disposition);
    }

    Ok(response
        .body(Body::from_stream(extraction.into_stream()))
        .unwrap())
}
