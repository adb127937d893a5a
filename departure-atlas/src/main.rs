use std::error::Error;

use tracing::info;
use tracing_subscriber::EnvFilter;

use departure_atlas::aggregator::{Aggregator, TransportBackend};
use departure_atlas::cache::CachedProvider;
use departure_atlas::config::AppConfig;
use departure_atlas::playlist::{DEFAULT_TRACK_COUNT, Playlist, follow_boards};
use departure_atlas::tasks::{FileStore, TaskList};
use departure_atlas::tiles::TileClient;
use departure_atlas::transport::{MockTransport, TransportClient};
use departure_atlas::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    let backend = match &config.mock_file {
        Some(path) => {
            info!(path = %path.display(), "using fixture transport data");
            TransportBackend::Mock(MockTransport::from_file(path)?)
        }
        None => {
            let client = TransportClient::new(config.transport.clone())?;
            TransportBackend::Http(CachedProvider::new(client, &config.cache))
        }
    };
    let tiles = TileClient::new(config.tiles.clone())?;
    let aggregator = Aggregator::new(backend, tiles, config.aggregator.clone());

    // Each loaded board cues the next soundtrack.
    tokio::spawn(follow_boards(
        aggregator.subscribe(),
        Playlist::numbered(DEFAULT_TRACK_COUNT),
    ));

    let tasks = TaskList::load(FileStore::new(&config.tasks_path))?;
    info!(count = tasks.tasks().len(), path = %config.tasks_path.display(), "loaded tasks");

    let app = create_router(AppState::new(aggregator, tasks));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("departure atlas listening on http://{}", config.bind_addr);
    info!("  GET  /health");
    info!("  GET  /api/connection?station=NAME");
    info!("  GET  /api/connection/current");
    info!("  GET  /api/connection/current/furthest");
    info!("  GET  /api/stations/search?q=");
    info!("  GET  /api/tasks");
    info!("  POST /api/tasks");
    info!("  POST /api/tasks/:index/toggle");

    axum::serve(listener, app).await?;
    Ok(())
}
