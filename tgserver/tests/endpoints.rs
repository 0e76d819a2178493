//! End-to-end tests for the gateway router, without a real network listener
//!
//! Providers are wiremock servers; extraction tools are stand-in shell
//! binaries, so the full request path (validation → adapter/process →
//! response) is exercised in-process via `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use tgcatalog::{LastFmClient, RadioBrowserClient, YouTubeClient};
use tgextract::Extractor;
use tgserver::{create_router, AppState};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestGateway {
    youtube: MockServer,
    lastfm: MockServer,
    radio: MockServer,
}

impl TestGateway {
    async fn start() -> Self {
        Self {
            youtube: MockServer::start().await,
            lastfm: MockServer::start().await,
            radio: MockServer::start().await,
        }
    }

    /// Build a router over the mock providers and the given tool.
    fn router(&self, lastfm_key: Option<&str>, tool: &str) -> axum::Router {
        let youtube = YouTubeClient::builder()
            .base_url(self.youtube.uri())
            .api_key("yt-key")
            .build()
            .unwrap();

        let mut lastfm = LastFmClient::builder().base_url(format!("{}/", self.lastfm.uri()));
        if let Some(key) = lastfm_key {
            lastfm = lastfm.api_key(key);
        }

        let radio = RadioBrowserClient::builder()
            .base_url(self.radio.uri())
            .build()
            .unwrap();

        create_router(AppState {
            youtube,
            lastfm: lastfm.build().unwrap(),
            radio,
            extractor: Extractor::new(tool),
        })
    }
}

async fn get(router: axum::Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body.to_vec())
}

fn json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

// ============================================================================
// Catalog endpoints
// ============================================================================

#[tokio::test]
async fn test_search_without_query_is_rejected_locally() {
    let gateway = TestGateway::start().await;

    // The provider must never be called
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&gateway.youtube)
        .await;

    let (status, _, body) = get(gateway.router(Some("k"), "echo"), "/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body), json!({ "error": "Missing query" }));
}

#[tokio::test]
async fn test_search_returns_normalized_items() {
    let gateway = TestGateway::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "so what"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "id": { "videoId": "vid1" },
                    "snippet": {
                        "title": "So What",
                        "thumbnails": { "medium": { "url": "https://img/1.jpg" } },
                        "channelTitle": "Miles Davis"
                    }
                }
            ]
        })))
        .mount(&gateway.youtube)
        .await;

    let (status, _, body) = get(gateway.router(Some("k"), "echo"), "/search?q=so%20what").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_body(&body),
        json!([{ "id": "vid1", "title": "So What", "thumbnail": "https://img/1.jpg", "channel": "Miles Davis" }])
    );
}

#[tokio::test]
async fn test_provider_failure_yields_structured_500() {
    let gateway = TestGateway::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&gateway.youtube)
        .await;

    let (status, _, body) = get(gateway.router(Some("k"), "echo"), "/trending").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(&body);
    assert_eq!(body["error"], "YouTube API error");
    assert!(body["details"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn test_radio_filters_by_country() {
    let gateway = TestGateway::start().await;

    Mock::given(method("GET"))
        .and(path("/json/stations"))
        .and(query_param("country", "Kenya"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "Ghetto Radio", "country": "Kenya", "favicon": "", "url_resolved": "https://gr/live" }
        ])))
        .mount(&gateway.radio)
        .await;

    let (status, _, body) = get(gateway.router(Some("k"), "echo"), "/radio?country=Kenya").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_body(&body),
        json!([{ "name": "Ghetto Radio", "country": "Kenya", "favicon": "", "url": "https://gr/live" }])
    );
}

#[tokio::test]
async fn test_genre_tracks_image_degradation_end_to_end() {
    let gateway = TestGateway::start().await;

    // Three tracks: two with a 3-element image array, one with none
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("method", "tag.gettoptracks"))
        .and(query_param("tag", "rock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": {
                "track": [
                    { "name": "A", "artist": { "name": "AA" },
                      "image": [{ "#text": "s" }, { "#text": "m" }, { "#text": "l-a" }] },
                    { "name": "B", "artist": { "name": "BB" },
                      "image": [{ "#text": "s" }, { "#text": "m" }, { "#text": "l-b" }] },
                    { "name": "C", "artist": { "name": "CC" } }
                ]
            }
        })))
        .mount(&gateway.lastfm)
        .await;

    let (status, _, body) = get(gateway.router(Some("k"), "echo"), "/genre-tracks?genre=rock").await;
    assert_eq!(status, StatusCode::OK);

    let tracks = json_body(&body);
    assert_eq!(tracks.as_array().unwrap().len(), 3);
    assert_eq!(tracks[0]["image"], "l-a");
    assert_eq!(tracks[2]["image"], "");
}

#[tokio::test]
async fn test_genre_tracks_missing_genre() {
    let gateway = TestGateway::start().await;
    let (status, _, body) = get(gateway.router(Some("k"), "echo"), "/genre-tracks").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body), json!({ "error": "Missing genre" }));
}

#[tokio::test]
async fn test_playlist_tracks_missing_playlist() {
    let gateway = TestGateway::start().await;
    let (status, _, body) = get(gateway.router(Some("k"), "echo"), "/playlist-tracks").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body), json!({ "error": "Missing playlist" }));
}

#[tokio::test]
async fn test_lastfm_endpoints_without_key() {
    let gateway = TestGateway::start().await;

    for uri in ["/artists", "/genre-tracks?genre=rock", "/playlist-tracks?playlist=x"] {
        let (status, _, body) = get(gateway.router(None, "echo"), uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(json_body(&body), json!({ "error": "Missing Last.fm API key" }));
    }
}

// ============================================================================
// Streaming endpoints
// ============================================================================

/// Shell script that records each invocation, used to assert spawn counts
fn counting_tool(dir: &std::path::Path) -> (String, std::path::PathBuf) {
    let marker = dir.join("spawned");
    let script = dir.join("fake-ytdlp.sh");
    let mut file = std::fs::File::create(&script).unwrap();
    writeln!(file, "#!/bin/sh\ntouch {}\nexit 0", marker.display()).unwrap();
    drop(file);
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    (script.to_string_lossy().into_owned(), marker)
}

#[tokio::test]
async fn test_stream_without_id_spawns_nothing() {
    let gateway = TestGateway::start().await;
    let dir = tempfile::tempdir().unwrap();
    let (tool, marker) = counting_tool(dir.path());

    let (status, _, body) = get(gateway.router(Some("k"), &tool), "/stream").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body), json!({ "error": "Missing video id" }));
    assert!(!marker.exists(), "no process may be spawned");
}

#[tokio::test]
async fn test_stream_relays_process_output() {
    let gateway = TestGateway::start().await;

    let (status, headers, body) = get(gateway.router(Some("k"), "echo"), "/stream?id=abc123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "audio/mpeg");
    assert!(headers.get(header::CONTENT_DISPOSITION).is_none());

    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("https://www.youtube.com/watch?v=abc123"));
}

#[tokio::test]
async fn test_download_sets_attachment_headers() {
    let gateway = TestGateway::start().await;

    let (status, headers, _) = get(gateway.router(Some("k"), "echo"), "/download?id=abc123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "audio/mpeg");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"audio.mp3\""
    );
}

#[tokio::test]
async fn test_download_video_headers_precede_body() {
    let gateway = TestGateway::start().await;

    let response = gateway
        .router(Some("k"), "echo")
        .oneshot(
            Request::builder()
                .uri("/download-video?id=abc123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Headers are committed before any body byte is read
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "video/mp4");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"video.mp4\""
    );
}

#[tokio::test]
async fn test_spawn_failure_is_plain_text_500() {
    let gateway = TestGateway::start().await;

    let (status, _, body) = get(
        gateway.router(Some("k"), "/definitely/not/a/real/tool"),
        "/stream?id=abc123",
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(String::from_utf8(body).unwrap(), "yt-dlp error");
}
