//! Whale sighting map service
//!
//! Renders a map of nearby ships and user-reported whale sightings, and
//! stores new reports in a local SQLite database.

pub mod compose;
pub mod config;
pub mod database;
pub mod errors;
pub mod feed;
pub mod handlers;
pub mod models;
pub mod server;
pub mod state;
