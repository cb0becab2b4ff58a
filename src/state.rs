//! Shared application state

use std::sync::Arc;

use crate::{
    compose::MapView,
    config::AppConfig,
    database::SightingStore,
    errors::WhaleWatchError,
    feed::{ShipFeed, StaticFeed},
};

/// Everything a request handler needs, built once from [`AppConfig`]
#[derive(Clone)]
pub struct AppState {
    pub store: SightingStore,
    pub feed: Arc<dyn ShipFeed>,
    pub view: MapView,
}

impl AppState {
    pub fn new(store: SightingStore, feed: Arc<dyn ShipFeed>, view: MapView) -> Self {
        Self { store, feed, view }
    }

    /// Construct the store and map view described by the configuration,
    /// with the built-in ship stub as feed
    pub fn from_config(config: &AppConfig) -> Result<Arc<Self>, WhaleWatchError> {
        let store = SightingStore::new(config.database.clone())?;
        let view = MapView::from(&config.map);

        Ok(Arc::new(Self::new(
            store,
            Arc::new(StaticFeed::stub()),
            view,
        )))
    }
}
