//! Earthquake domain model. Read-only from the client's perspective.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::decimal::{deserialize_decimal, deserialize_optional_decimal};

/// A recorded seismic event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Earthquake {
    pub id: i64,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub magnitude: f64,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub depth: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub region: Option<i64>,
    #[serde(default)]
    pub region_name: Option<String>,
    /// main_shock, aftershock or foreshock.
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Reported intensity scale reading, when known.
    #[serde(default)]
    pub intensity: Option<String>,
    #[serde(alias = "timestamp")]
    pub triggered_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl Earthquake {
    /// Place description used in prompts: region name, else coordinates.
    pub fn place_label(&self) -> String {
        if let Some(region) = self.region_name.as_deref().filter(|r| !r.is_empty()) {
            return region.to_string();
        }
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => format!("{}, {}", lat, lon),
            _ => "nearby".to_string(),
        }
    }
}

/// Envelope returned by `earthquakes/by_location`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyEarthquakes {
    #[serde(default)]
    pub count: usize,
    pub search_location: SearchLocation,
    #[serde(default)]
    pub earthquakes: Vec<Earthquake>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}
