use axum::Router;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fare_server::airports::AirportDirectory;
use fare_server::config::ServerConfig;
use fare_server::fares::{FareClient, MockFareSource};
use fare_server::search::FareSource;
use fare_server::web::{AppState, SEARCH_PATH, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    let airports = AirportDirectory::from_path(&config.airports_path);

    // Pick the fare source
    let app = match &config.mock_dir {
        Some(dir) => {
            warn!(dir = %dir.display(), "Serving fares from mock fixtures");
            let source = MockFareSource::from_dir(dir).expect("Failed to load mock fares");
            let origins: Vec<&str> = source.origins().map(|o| o.as_str()).collect();
            info!(?origins, "Loaded mock fare fixtures");
            app(source, airports, &config)
        }
        None => {
            info!(base_url = %config.fares.base_url, "Using live fare API");
            let source = FareClient::new(config.fares.clone()).expect("Failed to create fare client");
            app(source, airports, &config)
        }
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listen address");
    info!(addr = %config.bind_addr, "Flight search listening");
    info!("  GET  /health");
    info!("  GET  {SEARCH_PATH}");

    axum::serve(listener, app).await.expect("Server error");
}

fn app<S: FareSource + 'static>(
    source: S,
    airports: AirportDirectory,
    config: &ServerConfig,
) -> Router {
    create_router(AppState::new(source, airports, config.search.clone()))
}
