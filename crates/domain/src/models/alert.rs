//! Alert domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::decimal::deserialize_optional_decimal;

/// Lifecycle status of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Resolved,
}

impl AlertStatus {
    /// Order used when regenerating mock alerts.
    pub const CYCLE: [AlertStatus; 3] = [
        AlertStatus::Active,
        AlertStatus::Acknowledged,
        AlertStatus::Resolved,
    ];
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertStatus::Active => write!(f, "active"),
            AlertStatus::Acknowledged => write!(f, "acknowledged"),
            AlertStatus::Resolved => write!(f, "resolved"),
        }
    }
}

impl FromStr for AlertStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(AlertStatus::Active),
            "acknowledged" => Ok(AlertStatus::Acknowledged),
            "resolved" => Ok(AlertStatus::Resolved),
            other => Err(format!("Unknown alert status: {}", other)),
        }
    }
}

/// An alert raised for an earthquake or a shelter incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    #[serde(default)]
    pub alert_id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub alert_type: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub magnitude: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub depth: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub earthquake: Option<i64>,
    #[serde(default)]
    pub earthquake_event_id: Option<String>,
    #[serde(default)]
    pub shelter: Option<i64>,
    #[serde(default)]
    pub shelter_name: Option<String>,
    pub status: AlertStatus,
    #[serde(alias = "timestamp")]
    pub triggered_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledged_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Alert {
    /// Headline used in summaries: the alert type, else "Alert".
    pub fn headline(&self) -> &str {
        self.alert_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("Alert")
    }

    /// Detail line: description, else location, else a placeholder.
    pub fn detail(&self) -> String {
        if let Some(desc) = self.description.as_deref().filter(|d| !d.is_empty()) {
            return desc.to_string();
        }
        match (&self.location, self.magnitude) {
            (Some(location), Some(magnitude)) => format!("Magnitude {} near {}", magnitude, location),
            (Some(location), None) => location.clone(),
            _ => "No details".to_string(),
        }
    }
}
