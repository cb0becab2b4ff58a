//! Map composition
//!
//! [`compose`] merges ship positions and stored sightings into a
//! [`MapDocument`]: a plain value holding the view and one [`Marker`] per
//! point. The document renders itself to a standalone Leaflet fragment;
//! where that fragment ends up is the caller's business.

use serde::Serialize;

use crate::{
    config::MapConfig,
    models::{ShipPosition, Sighting},
};

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Center, zoom and tile source of the rendered map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
}

impl From<&MapConfig> for MapView {
    fn from(config: &MapConfig) -> Self {
        Self {
            latitude: config.latitude,
            longitude: config.longitude,
            zoom: config.zoom,
            tile_url: config.tile_url.clone(),
            attribution: config.attribution.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Ship,
    Sighting,
}

impl MarkerKind {
    fn color(self) -> &'static str {
        match self {
            Self::Ship => "#d9534f",
            Self::Sighting => "#2a81cb",
        }
    }
}

/// A labeled point on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
    pub kind: MarkerKind,
}

impl From<&ShipPosition> for Marker {
    fn from(ship: &ShipPosition) -> Self {
        Self {
            latitude: ship.latitude,
            longitude: ship.longitude,
            label: format!("Ship: {}", ship.name),
            kind: MarkerKind::Ship,
        }
    }
}

impl From<&Sighting> for Marker {
    fn from(sighting: &Sighting) -> Self {
        Self {
            latitude: sighting.latitude,
            longitude: sighting.longitude,
            label: format!(
                "Whale spotted by {} on {}",
                sighting.name.as_deref().unwrap_or("anonymous"),
                sighting.date.format("%Y-%m-%d %H:%M UTC")
            ),
            kind: MarkerKind::Sighting,
        }
    }
}

/// Self-contained map ready to be embedded in a page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapDocument {
    pub view: MapView,
    pub markers: Vec<Marker>,
}

/// Build the map: ships first, then sightings in store order.
///
/// Every point becomes a marker, however far it lies from the center.
pub fn compose(view: &MapView, ships: &[ShipPosition], sightings: &[Sighting]) -> MapDocument {
    let markers = ships
        .iter()
        .map(Marker::from)
        .chain(sightings.iter().map(Marker::from))
        .collect();

    MapDocument {
        view: view.clone(),
        markers,
    }
}

impl MapDocument {
    pub fn count(&self, kind: MarkerKind) -> usize {
        self.markers.iter().filter(|m| m.kind == kind).count()
    }

    /// Render as an HTML fragment: Leaflet assets, a map container and the
    /// script placing the markers.
    ///
    /// Labels are attached as text nodes so reporter input is never parsed
    /// as markup.
    pub fn to_html(&self) -> String {
        let markers: Vec<serde_json::Value> = self
            .markers
            .iter()
            .map(|m| {
                serde_json::json!({
                    "lat": m.latitude,
                    "lon": m.longitude,
                    "label": m.label,
                    "kind": m.kind,
                    "color": m.kind.color(),
                })
            })
            .collect();
        let data = serde_json::json!({
            "center": [self.view.latitude, self.view.longitude],
            "zoom": self.view.zoom,
            "tiles": self.view.tile_url,
            "attribution": self.view.attribution,
            "markers": markers,
        });

        format!(
            r#"<link rel="stylesheet" href="{LEAFLET_CSS}">
<script src="{LEAFLET_JS}"></script>
<div id="map" class="map" data-markers="{count}"></div>
<script id="map-data" type="application/json">{data}</script>
<script>
(function () {{
    var doc = JSON.parse(document.getElementById("map-data").textContent);
    var map = L.map("map").setView(doc.center, doc.zoom);
    L.tileLayer(doc.tiles, {{ maxZoom: 19, attribution: doc.attribution }}).addTo(map);
    doc.markers.forEach(function (m) {{
        var label = document.createElement("span");
        label.textContent = m.label;
        L.circleMarker([m.lat, m.lon], {{ radius: 8, color: m.color, fillOpacity: 0.7 }})
            .bindPopup(label)
            .addTo(map);
    }});
}})();
</script>"#,
            count = self.markers.len(),
            data = script_safe_json(&data),
        )
    }
}

/// Serialize JSON so it cannot terminate the surrounding `<script>` element
fn script_safe_json(value: &serde_json::Value) -> String {
    value
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}
