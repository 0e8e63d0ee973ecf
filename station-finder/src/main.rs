use std::sync::Arc;

use station_finder::catalog::Catalog;
use station_finder::config::Config;
use station_finder::location::{ReplaySensor, Subscription, WatchOptions};
use station_finder::ranking::RankingConfig;
use station_finder::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // Load the station catalog (fail fast if it is invalid)
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };
    info!(
        stations = catalog.len(),
        active = catalog.active_stations().count(),
        "catalog ready"
    );

    let ranking = RankingConfig::default().with_nearby_count(config.nearby_count);
    let mut state = AppState::new(catalog, ranking);

    // Optional live location feed; kept alive for the life of the server
    let _subscription = match &config.track_path {
        Some(path) => {
            let sensor = Arc::new(ReplaySensor::load(path)?);
            let subscription = Subscription::subscribe(sensor, WatchOptions::default());
            state = state.with_location(subscription.watch());
            Some(subscription)
        }
        None => None,
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("Station finder listening on http://{}", config.addr);
    info!("  GET /health              - Health check");
    info!("  GET /api/stations        - Active stations, nearest first");
    info!("  GET /api/stations/nearby - Nearest few stations");
    info!("  GET /api/location        - Live location state");

    axum::serve(listener, app).await?;
    Ok(())
}
