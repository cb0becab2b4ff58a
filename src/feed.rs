//! Ship position feeds
//!
//! [`StaticFeed`] serves a fixed list of vessels. Page rendering goes
//! through [`nearby_or_empty`], so a failing feed only costs the ship
//! markers, never the page.

use async_trait::async_trait;
use tracing::warn;

use crate::{errors::WhaleWatchError, models::ShipPosition};

/// Source of current ship positions
#[async_trait]
pub trait ShipFeed: Send + Sync {
    /// Fetch vessels near the area of interest.
    ///
    /// Failures are reported as [`WhaleWatchError::FeedUnavailable`].
    async fn fetch_nearby(&self) -> Result<Vec<ShipPosition>, WhaleWatchError>;
}

/// Fetch ship positions, degrading any feed failure to an empty list
pub async fn nearby_or_empty(feed: &dyn ShipFeed) -> Vec<ShipPosition> {
    match feed.fetch_nearby().await {
        Ok(ships) => ships,
        Err(e) => {
            warn!("Rendering without ships: {}", e);
            Vec::new()
        }
    }
}

/// Fixed list of ship positions
#[derive(Debug, Clone)]
pub struct StaticFeed {
    ships: Vec<ShipPosition>,
}

impl StaticFeed {
    pub fn new(ships: Vec<ShipPosition>) -> Self {
        Self { ships }
    }

    /// Two simulated vessels in Vancouver harbour
    pub fn stub() -> Self {
        Self::new(vec![
            ShipPosition::new("Ship 1", 49.281, -123.122),
            ShipPosition::new("Ship 2", 49.283, -123.121),
        ])
    }
}

#[async_trait]
impl ShipFeed for StaticFeed {
    async fn fetch_nearby(&self) -> Result<Vec<ShipPosition>, WhaleWatchError> {
        Ok(self.ships.clone())
    }
}
