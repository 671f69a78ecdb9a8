use server::{AppState, config::ServerConfig};
use services::services::{config::AssetConfig, image_url::ImageUrlService};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the process environment still applies.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let server_config = ServerConfig::from_env()?;
    let asset_config = AssetConfig::from_env()?;
    info!(
        backend_url = %asset_config.backend_url,
        placeholder_width = asset_config.placeholder_width,
        placeholder_height = asset_config.placeholder_height,
        "Loaded asset config"
    );

    let state = AppState::new(ImageUrlService::new(asset_config));
    server::run(server_config, state).await
}
