// src/database.rs
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode};
use sqlx::{ConnectOptions, Connection};
use tracing::{debug, error, info};

use crate::{
    config::DatabaseConfig,
    errors::WhaleWatchError,
    models::{NewSighting, Sighting},
};

mod models;

use models::SightingRow;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Append-only store of whale sightings.
///
/// Holds no open handle: every operation opens its own connection and
/// closes it before returning, leaving write serialization to SQLite.
#[derive(Debug, Clone)]
pub struct SightingStore {
    options: SqliteConnectOptions,
    config: DatabaseConfig,
}

impl SightingStore {
    /// Create a new store. Does not touch the database file yet.
    pub fn new(config: DatabaseConfig) -> Result<Self, WhaleWatchError> {
        config.validate()?;

        info!(
            "Initializing SightingStore: path={}, busy_timeout={:?}",
            config.path.display(),
            config.busy_timeout
        );

        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(config.busy_timeout);

        Ok(Self { options, config })
    }

    async fn connect(&self) -> Result<SqliteConnection, WhaleWatchError> {
        self.options.connect().await.map_err(|e| {
            error!(
                "Failed to open database {}: {}",
                self.config.path.display(),
                e
            );
            WhaleWatchError::Persistence(e)
        })
    }

    /// Create table `sightings` unless it already exists.
    ///
    /// Safe to call on every start; existing rows are left alone.
    pub async fn initialize(&self) -> Result<(), WhaleWatchError> {
        let mut conn = self.connect().await?;
        if let Err(e) = MIGRATOR.run(&mut conn).await {
            error!("Failed to create sightings table: {}", e);
            return Err(e.into());
        }
        conn.close().await?;

        info!("Database ready at {}", self.config.path.display());
        Ok(())
    }

    /// Store a sighting, stamping it with the current server time
    pub async fn insert(&self, sighting: NewSighting) -> Result<Sighting, WhaleWatchError> {
        let mut conn = self.connect().await?;
        let date = Utc::now();

        let result = sqlx::query(
            "INSERT INTO sightings (name, location, latitude, longitude, date)
            VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(sighting.name.as_deref())
        .bind(sighting.location.as_deref())
        .bind(sighting.latitude)
        .bind(sighting.longitude)
        .bind(date)
        .execute(&mut conn)
        .await?;
        conn.close().await?;

        let stored = Sighting {
            id: result.last_insert_rowid(),
            name: sighting.name,
            location: sighting.location,
            latitude: sighting.latitude,
            longitude: sighting.longitude,
            date,
        };
        debug!(
            "Stored sighting {} at ({}, {})",
            stored.id, stored.latitude, stored.longitude
        );

        Ok(stored)
    }

    /// Every stored sighting, oldest first
    pub async fn list_all(&self) -> Result<Vec<Sighting>, WhaleWatchError> {
        let mut conn = self.connect().await?;

        let rows: Vec<SightingRow> = sqlx::query_as(
            "SELECT id, name, location, latitude, longitude, date
            FROM sightings ORDER BY id",
        )
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        Ok(rows.into_iter().map(Sighting::from).collect())
    }

    /// Number of stored sightings
    pub async fn count(&self) -> Result<u64, WhaleWatchError> {
        let mut conn = self.connect().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sightings")
            .fetch_one(&mut conn)
            .await?;
        conn.close().await?;

        Ok(count.max(0) as u64)
    }
}

/// Builder for SightingStore with simplified configuration
pub struct SightingStoreBuilder {
    path: Option<PathBuf>,
    busy_timeout: Option<Duration>,
}

impl SightingStoreBuilder {
    pub fn new() -> Self {
        Self {
            path: None,
            busy_timeout: None,
        }
    }

    pub fn path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<SightingStore, WhaleWatchError> {
        let path = self
            .path
            .unwrap_or_else(|| PathBuf::from("./db/sightings.db"));
        let busy_timeout = self.busy_timeout.unwrap_or(Duration::from_secs(5));

        SightingStore::new(DatabaseConfig { path, busy_timeout })
    }
}

impl Default for SightingStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
