use anyhow::Result;
use tgconfig::Config;
use tgserver::{create_router, init_logging, serve, AppState};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    // ========== Phase 1: configuration ==========
    let config = Config::load()?;

    if config.providers.youtube.api_key.is_none() {
        warn!("⚠️ No YouTube API key configured; /search and /trending will fail");
    }
    if config.providers.lastfm.api_key.is_none() {
        warn!("⚠️ No Last.fm API key configured; /artists and tag charts will fail");
    }
    info!("🎬 Extraction tool: {}", config.extractor.tool);

    // ========== Phase 2: clients and router ==========
    let state = AppState::from_config(&config)?;
    let router = create_router(state);
    info!("✅ Catalog clients and extraction pipeline ready");

    // ========== Phase 3: serve ==========
    serve(router, config.server.http_port).await
}
