//! Earthquake prediction and zone statistics returned by the public API.

use serde::{Deserialize, Serialize};
use shared::decimal::deserialize_decimal;

/// A predicted seismic zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedZone {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub latitude: f64,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub longitude: f64,
    /// critical, high, moderate or low.
    pub risk_level: String,
    #[serde(default)]
    pub risk_score: f64,
    #[serde(default)]
    pub predicted_magnitude_range: Option<String>,
    #[serde(default)]
    pub historical_count: u32,
    #[serde(default)]
    pub depth_avg: Option<f64>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub analysis_method: Option<String>,
}

/// Per-region aggregate inside [`ZoneStatistics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionActivity {
    pub name: String,
    pub count: u32,
    #[serde(default)]
    pub avg_magnitude: f64,
}

/// One-year activity summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneStatistics {
    #[serde(default)]
    pub total_earthquakes_1year: u32,
    #[serde(default)]
    pub average_magnitude: f64,
    #[serde(default)]
    pub highest_magnitude: f64,
    #[serde(default)]
    pub regions: Vec<RegionActivity>,
}

/// Body of `predictions/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakePredictions {
    #[serde(default)]
    pub predictions: Vec<PredictedZone>,
    #[serde(default)]
    pub statistics: ZoneStatistics,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `statistics/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeStatistics {
    #[serde(default)]
    pub zone_statistics: ZoneStatistics,
    /// Zones rated critical.
    #[serde(default)]
    pub high_risk_zones: Vec<PredictedZone>,
    /// Zones rated high or moderate.
    #[serde(default)]
    pub moderate_risk_zones: Vec<PredictedZone>,
    #[serde(default)]
    pub total_risk_zones: u32,
}

impl EarthquakePredictions {
    /// Zones ranked by descending risk score.
    pub fn ranked(&self) -> Vec<&PredictedZone> {
        let mut zones: Vec<&PredictedZone> = self.predictions.iter().collect();
        zones.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
        zones
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predictions_deserialization() {
        let json = r#"{
            "predictions": [
                {"id": "pred_8.98_125.54", "name": "Predicted Zone - 12 historical events",
                 "latitude": 8.9801, "longitude": 125.5381, "risk_level": "high",
                 "risk_score": 61.25, "predicted_magnitude_range": "4.1 - 5.6",
                 "historical_count": 12, "depth_avg": 14.2, "type": "prediction",
                 "confidence": 40.0, "description": "zone", "analysis_method": "clustering"},
                {"id": "pred_9.50_125.80", "name": "Surigao Fault Zone",
                 "latitude": 9.5, "longitude": 125.8, "risk_level": "critical",
                 "risk_score": 82.0, "historical_count": 30, "type": "known_zone"}
            ],
            "statistics": {"total_earthquakes_1year": 42, "average_magnitude": 4.21,
                           "highest_magnitude": 42, "regions": [
                               {"name": "Surigao del Norte", "count": 20, "avg_magnitude": 4.6}]},
            "message": "Earthquake predictions based on historical data analysis"
        }"#;

        let body: EarthquakePredictions = serde_json::from_str(json).unwrap();
        assert_eq!(body.predictions.len(), 2);
        assert_eq!(body.statistics.regions[0].count, 20);

        let ranked = body.ranked();
        assert_eq!(ranked[0].risk_level, "critical");
        assert_eq!(ranked[1].kind.as_deref(), Some("prediction"));
    }

    #[test]
    fn test_statistics_deserialization() {
        let json = r#"{
            "zone_statistics": {"total_earthquakes_1year": 3, "average_magnitude": 3.9,
                                "highest_magnitude": 3, "regions": []},
            "high_risk_zones": [], "moderate_risk_zones": [
                {"id": "pred_8.60_125.40", "name": "Agusan Marsh Zone", "latitude": "8.6",
                 "longitude": "125.4", "risk_level": "moderate", "risk_score": 35.5}
            ],
            "total_risk_zones": 5
        }"#;
        let stats: EarthquakeStatistics = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_risk_zones, 5);
        assert!(stats.high_risk_zones.is_empty());
        assert_eq!(stats.moderate_risk_zones[0].latitude, 8.6);
        assert_eq!(stats.zone_statistics.total_earthquakes_1year, 3);
    }
}
