//! Stored AI recommendation records kept by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::decimal::deserialize_optional_decimal;

/// A recommendation persisted by the backend, as opposed to one generated
/// on the fly by the chat-completion client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecommendation {
    pub id: i64,
    pub recommendation_id: String,
    #[serde(default)]
    pub earthquake: Option<i64>,
    #[serde(default)]
    pub shelter: Option<i64>,
    #[serde(default)]
    pub shelter_name: Option<String>,
    pub recommendation_text: String,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub confidence_score: Option<f64>,
    /// pending, implemented, rejected or in_progress.
    pub status: String,
    #[serde(default)]
    pub implemented_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_recommendation_deserialization() {
        let json = r#"{
            "id": 1, "recommendation_id": "REC-001", "earthquake": null,
            "shelter": 2, "shelter_name": "Surigao City Convention Center",
            "recommendation_text": "Open overflow area", "confidence_score": "0.85",
            "status": "pending", "implemented_at": null, "implemented_by": null
        }"#;
        let rec: StoredRecommendation = serde_json::from_str(json).unwrap();
        assert_eq!(rec.confidence_score, Some(0.85));
    }
}
