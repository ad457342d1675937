//! schoolbot daemon: wires the LINE adapter, Vision OCR, and MongoDB
//! store together and serves the webhook endpoint.

use std::net::SocketAddr;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use schoolbot_bot::EventHandler;
use schoolbot_channels::{LineAdapter, LineClient, LineConfig};
use schoolbot_ocr::VisionRecognizer;
use schoolbot_store::MongoStudentStore;

mod config;

use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    let store = MongoStudentStore::new(&config.mongodb_uri);
    let ocr = VisionRecognizer::new(&config.vision_api_key);
    let line = LineClient::new(&config.channel_access_token);
    let handler = EventHandler::new(store, ocr, line);

    let adapter = LineAdapter::new(
        LineConfig {
            channel_secret: config.channel_secret.clone(),
            webhook_path: config.webhook_path.clone(),
        },
        handler,
    );
    let app = adapter.build_router();

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("schoolbot listening on {} ({})", addr, adapter.webhook_path());
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
