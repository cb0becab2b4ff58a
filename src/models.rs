//! Data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::WhaleWatchError;
use serde_helpers::*;

/// A persisted whale observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sighting {
    /// Row id assigned by the store
    pub id: i64,
    /// Reporter, if given
    pub name: Option<String>,
    /// Free-text place label, if given
    pub location: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Time the report was received by the server
    pub date: DateTime<Utc>,
}

/// A report that has passed type coercion and is ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewSighting {
    pub name: Option<String>,
    pub location: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Current position of a vessel. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipPosition {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ShipPosition {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

/// Sighting report as submitted by the browser form.
///
/// Every field is kept as raw text so that coercion failures can be
/// reported as [`WhaleWatchError::Validation`] instead of an extractor
/// rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportForm {
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    pub latitude: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    pub longitude: Option<String>,
}

impl ReportForm {
    /// Coerce coordinates to floating point
    pub fn into_new_sighting(self) -> Result<NewSighting, WhaleWatchError> {
        let latitude = parse_coordinate("latitude", self.latitude.as_deref())?;
        let longitude = parse_coordinate("longitude", self.longitude.as_deref())?;

        Ok(NewSighting {
            name: self.name,
            location: self.location,
            latitude,
            longitude,
        })
    }
}

fn parse_coordinate(field: &str, value: Option<&str>) -> Result<f64, WhaleWatchError> {
    let raw =
        value.ok_or_else(|| WhaleWatchError::Validation(format!("{} is required", field)))?;
    let parsed = raw
        .parse::<f64>()
        .map_err(|_| WhaleWatchError::Validation(format!("{} is not a number: {:?}", field, raw)))?;
    if !parsed.is_finite() {
        return Err(WhaleWatchError::Validation(format!(
            "{} must be finite: {:?}",
            field, raw
        )));
    }
    Ok(parsed)
}

/// Custom deserializers
mod serde_helpers {
    use serde::{self, Deserialize, Deserializer};

    /// Trim surrounding whitespace, mapping blank input to `None`
    pub fn deserialize_trimmed_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserializer)?;
        Ok(s.and_then(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(lat: Option<&str>, lon: Option<&str>) -> ReportForm {
        ReportForm {
            name: Some("Alice".to_string()),
            location: Some("Bay".to_string()),
            latitude: lat.map(str::to_string),
            longitude: lon.map(str::to_string),
        }
    }

    #[test]
    fn coerce_report() {
        let sighting = form(Some("49.28"), Some("-123.12"))
            .into_new_sighting()
            .unwrap();
        let expected = NewSighting {
            name: Some("Alice".to_string()),
            location: Some("Bay".to_string()),
            latitude: 49.28,
            longitude: -123.12,
        };

        assert_eq!(sighting, expected);
    }

    #[test]
    fn coordinates_are_not_range_checked() {
        let sighting = form(Some("123.0"), Some("-400")).into_new_sighting().unwrap();
        assert_eq!(sighting.latitude, 123.0);
        assert_eq!(sighting.longitude, -400.0);
    }

    #[test]
    fn non_numeric_latitude_is_rejected() {
        let err = form(Some("north"), Some("-123.12"))
            .into_new_sighting()
            .unwrap_err();
        assert!(matches!(err, WhaleWatchError::Validation(msg) if msg.contains("latitude")));
    }

    #[test]
    fn missing_longitude_is_rejected() {
        let err = form(Some("49.28"), None).into_new_sighting().unwrap_err();
        assert!(matches!(err, WhaleWatchError::Validation(msg) if msg.contains("longitude")));
    }

    #[test]
    fn non_finite_is_rejected() {
        assert!(form(Some("NaN"), Some("1")).into_new_sighting().is_err());
        assert!(form(Some("1"), Some("inf")).into_new_sighting().is_err());
    }

    #[test]
    fn parse_form_fields() {
        let s = r#"{"name": "  Alice ", "location": "", "latitude": " 49.28", "longitude": "-123.12"}"#;
        let report: ReportForm = serde_json::from_str(s).unwrap();

        assert_eq!(report.name.as_deref(), Some("Alice"));
        assert_eq!(report.location, None);
        assert_eq!(report.latitude.as_deref(), Some("49.28"));
    }

    #[test]
    fn parse_form_missing_fields() {
        let report: ReportForm = serde_json::from_str("{}").unwrap();
        assert!(report.name.is_none());
        assert!(report.latitude.is_none());
    }
}
