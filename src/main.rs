// src/main.rs

use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use carmind::api::http::router::http_router;
use carmind::config::CONFIG;
use carmind::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let level = CONFIG.log_level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting carmind backend v{}", env!("CARGO_PKG_VERSION"));
    CONFIG.validate()?;

    let app_state = Arc::new(AppState::from_config(&CONFIG)?);
    info!(
        "NER available: {}, emotion available: {}, Spotify available: {}",
        app_state.entity_extractor.ner_available(),
        app_state.entity_extractor.emotion_available(),
        app_state.music.is_available(),
    );

    let app = http_router(app_state, &CONFIG.cors_origins);

    let bind_address = CONFIG.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("HTTP server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}
