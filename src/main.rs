use anyhow::{Context, Result};
use onest_api::AppState;
use onest_core::Config;
use onest_weather::WeatherClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    onest_core::init()?;

    let config = Config::load_validated().context("Failed to load configuration")?;
    tracing::info!(
        secondary = %config.weather.secondary_url,
        primary = %config.weather.primary_url,
        ttl_seconds = config.weather.cache_ttl_seconds,
        "Weather client configured"
    );

    let weather = WeatherClient::new(config.weather.client_config())
        .context("Failed to build weather client")?;

    tracing::info!("OneST portal starting");
    onest_api::serve(&config.server, AppState::new(weather))
        .await
        .context("HTTP server failed")?;

    Ok(())
}
