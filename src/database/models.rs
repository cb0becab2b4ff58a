// src/database/models.rs
use chrono::{DateTime, Utc};

use crate::models::Sighting;

#[derive(Debug, sqlx::FromRow)]
pub(super) struct SightingRow {
    id: i64,
    name: Option<String>,
    location: Option<String>,
    latitude: f64,
    longitude: f64,
    date: DateTime<Utc>,
}

impl From<SightingRow> for Sighting {
    fn from(row: SightingRow) -> Self {
        Sighting {
            id: row.id,
            name: row.name,
            location: row.location,
            latitude: row.latitude,
            longitude: row.longitude,
            date: row.date,
        }
    }
}
