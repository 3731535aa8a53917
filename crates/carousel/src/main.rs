use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use surprise_carousel::{CarouselConfig, CarouselPoller, HttpContentSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "surprise_carousel=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CarouselConfig::from_env();
    let source = HttpContentSource::new(config.api_url.clone());
    tracing::info!(endpoint = %source.endpoint(), "Polling active content");

    let handle = CarouselPoller::new(source, config).spawn();

    tokio::signal::ctrl_c()
        .await
        .context("Failed to install Ctrl-C handler")?;
    tracing::info!("Received SIGINT (Ctrl-C), stopping carousel");

    handle.shutdown().await;
    Ok(())
}
