//! HTTP endpoint handlers
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Map of ships and all reported sightings |
//! | `POST` | `/report` | Store a sighting from a form submission |

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::{Form, Json};
use serde::Serialize;
use tracing::info;

use crate::{
    compose::{compose, MapDocument, MarkerKind},
    errors::WhaleWatchError,
    feed::nearby_or_empty,
    models::ReportForm,
    state::AppState,
};

pub const REPORT_CONFIRMATION: &str = "Sighting reported successfully!";

/// Body returned for an accepted report
#[derive(Debug, Serialize)]
pub struct Acknowledgement {
    pub status: &'static str,
    pub message: &'static str,
}

impl Acknowledgement {
    fn success() -> Self {
        Self {
            status: "success",
            message: REPORT_CONFIRMATION,
        }
    }
}

/// Render the map page with current ships and every stored sighting.
///
/// Ship feed problems only drop the ship markers; a store failure fails
/// the request.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, WhaleWatchError> {
    let ships = nearby_or_empty(state.feed.as_ref()).await;
    let sightings = state.store.list_all().await?;

    let map = compose(&state.view, &ships, &sightings);
    Ok(Html(render_page(&map)))
}

/// Accept a sighting report.
///
/// Coordinates that are missing or not numbers are rejected before
/// anything is written.
pub async fn report(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ReportForm>,
) -> Result<Json<Acknowledgement>, WhaleWatchError> {
    let sighting = form.into_new_sighting()?;
    let stored = state.store.insert(sighting).await?;

    info!(
        id = stored.id,
        latitude = stored.latitude,
        longitude = stored.longitude,
        "Sighting reported"
    );

    Ok(Json(Acknowledgement::success()))
}

fn render_page(map: &MapDocument) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Whale Watch</title>
    <style>
        body {{ font-family: sans-serif; margin: 0; }}
        header {{ padding: 0.75rem 1rem; background: #0b3d5c; color: #fff; }}
        header h1 {{ margin: 0; font-size: 1.4rem; }}
        .map {{ height: 70vh; width: 100%; }}
        form {{ display: flex; flex-wrap: wrap; gap: 0.5rem; padding: 1rem; align-items: center; }}
        #report-status {{ padding: 0 1rem; }}
    </style>
</head>
<body>
    <header>
        <h1>Whale Watch</h1>
        <span>{ships} ships nearby, {sightings} sightings reported</span>
    </header>
    {map_html}
    <form id="report-form" action="/report" method="post">
        <input name="name" placeholder="Your name">
        <input name="location" placeholder="Location">
        <input name="latitude" placeholder="Latitude" required>
        <input name="longitude" placeholder="Longitude" required>
        <button type="submit">Report sighting</button>
    </form>
    <p id="report-status"></p>
    <script>
    document.getElementById("report-form").addEventListener("submit", function (event) {{
        event.preventDefault();
        var status = document.getElementById("report-status");
        fetch("/report", {{ method: "POST", body: new URLSearchParams(new FormData(event.target)) }})
            .then(function (r) {{ return r.json(); }})
            .then(function (body) {{
                status.textContent = body.message || body.error;
                if (body.status === "success") {{ window.location.reload(); }}
            }})
            .catch(function (e) {{ status.textContent = "Report failed: " + e; }});
    }});
    </script>
</body>
</html>"#,
        ships = map.count(MarkerKind::Ship),
        sightings = map.count(MarkerKind::Sighting),
        map_html = map.to_html(),
    )
}
