//! Whale watch web service

use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use whale_watch::config::AppConfig;
use whale_watch::errors::WhaleWatchError;
use whale_watch::server;
use whale_watch::state::AppState;

#[tokio::main]
async fn main() -> Result<(), WhaleWatchError> {
    #[cfg(feature = "dotenvy")]
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("whale_watch=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::load()?;

    let state = AppState::from_config(&config)?;
    state.store.initialize().await?;
    info!("Loaded {} stored sightings", state.store.count().await?);

    tokio::select! {
        result = server::start_server(&config.server, state) => {
            info!("Server stopped: {:?}", result);
            result?;
        }
        _ = signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    Ok(())
}
