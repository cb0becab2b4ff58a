//! Application configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_with::serde_as;
use tracing::warn;

use crate::errors::WhaleWatchError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub map: MapConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[serde_as]
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    /// How long a connection waits on a locked database before failing
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub busy_timeout: Duration,
}

/// Initial map view and tile source
#[derive(Debug, Deserialize, Clone)]
pub struct MapConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("database.path", "./db/sightings.db")?
            .set_default("database.busy_timeout", 5)?
            .set_default("map.latitude", 49.2827)?
            .set_default("map.longitude", -123.1207)?
            .set_default("map.zoom", 12)?
            .set_default(
                "map.tile_url",
                "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            )?
            .set_default(
                "map.attribution",
                "&copy; OpenStreetMap contributors",
            )?
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                Environment::with_prefix("WHALEWATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl DatabaseConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), WhaleWatchError> {
        self.validate_path()?;
        if let Some(dir) = self.path.parent() {
            self.ensure_directory_exists(dir)?;
        }
        Ok(())
    }

    fn validate_path(&self) -> Result<(), WhaleWatchError> {
        if self.path.as_os_str().is_empty() {
            return Err(WhaleWatchError::ConfigurationError {
                message: "Database path cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    fn ensure_directory_exists(&self, dir: &Path) -> Result<(), WhaleWatchError> {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            warn!(
                "Database directory {} does not exist, attempting to create it",
                dir.display()
            );
            std::fs::create_dir_all(dir).map_err(|e| WhaleWatchError::ConfigurationError {
                message: format!("Could not create database directory: {}", e),
            })?;
        }
        Ok(())
    }
}
