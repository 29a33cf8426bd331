//! Shelter report domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A field report filed against a shelter or an earthquake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub report_id: String,
    #[serde(default)]
    pub shelter: Option<i64>,
    #[serde(default)]
    pub shelter_name: Option<String>,
    #[serde(default)]
    pub earthquake: Option<i64>,
    /// incident, capacity, status_update, inventory, maintenance or safety.
    pub report_type: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(default)]
    pub created_by_username: Option<String>,
    /// active, updated or resolved.
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for filing a report.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReportDraft {
    #[validate(length(min = 1, max = 50, message = "Report ID must be 1-50 characters"))]
    pub report_id: String,

    #[validate(length(min = 1, message = "Report type is required"))]
    pub report_type: String,

    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelter: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub earthquake: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_deserialization() {
        let json = r#"{
            "id": 2, "report_id": "RPT-002", "shelter": 4,
            "shelter_name": "Cabadbaran Evacuation Center", "earthquake": null,
            "report_type": "capacity", "title": "At capacity",
            "description": "No more beds", "created_by": 1,
            "created_by_username": "admin", "status": "active",
            "created_at": "2025-02-01T06:00:00Z", "updated_at": "2025-02-01T06:00:00Z"
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.report_type, "capacity");
        assert_eq!(report.shelter, Some(4));
    }

    #[test]
    fn test_draft_requires_title() {
        let draft = ReportDraft {
            report_id: "RPT-010".into(),
            report_type: "incident".into(),
            title: String::new(),
            description: None,
            shelter: Some(1),
            earthquake: None,
        };
        assert!(draft.validate().is_err());
    }
}
