//! Evacuation shelter domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::decimal::deserialize_optional_decimal;
use validator::Validate;

/// Operational status of a shelter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShelterStatus {
    Active,
    Full,
    Inactive,
    Maintenance,
}

impl fmt::Display for ShelterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShelterStatus::Active => write!(f, "active"),
            ShelterStatus::Full => write!(f, "full"),
            ShelterStatus::Inactive => write!(f, "inactive"),
            ShelterStatus::Maintenance => write!(f, "maintenance"),
        }
    }
}

impl FromStr for ShelterStatus {
    type Err = String;

    /// Parses case-insensitively; admin forms submit "Active", "FULL", etc.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(ShelterStatus::Active),
            "full" => Ok(ShelterStatus::Full),
            "inactive" => Ok(ShelterStatus::Inactive),
            "maintenance" => Ok(ShelterStatus::Maintenance),
            other => Err(format!("Unknown shelter status: {}", other)),
        }
    }
}

/// An evacuation shelter as served by the backend.
///
/// Occupancy is not bounded by capacity: overflowing shelters are reported
/// as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelter {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub shelter_type: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Region foreign key on the backend.
    #[serde(default)]
    pub region: Option<i64>,
    #[serde(default)]
    pub region_name: Option<String>,
    pub status: ShelterStatus,
    #[serde(rename = "capacity", alias = "max_capacity", default)]
    pub max_capacity: i32,
    #[serde(default)]
    pub current_occupancy: i32,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Shelter {
    /// Remaining places, zero when the shelter is at or over capacity.
    pub fn available_capacity(&self) -> i32 {
        (self.max_capacity - self.current_occupancy).max(0)
    }

    /// Human-readable location: the address, else the region name.
    pub fn location_label(&self) -> &str {
        self.address
            .as_deref()
            .or(self.region_name.as_deref())
            .unwrap_or("N/A")
    }
}

/// Payload for creating a shelter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ShelterDraft {
    #[validate(length(min = 1, max = 150, message = "Name must be 1-150 characters"))]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelter_type: Option<String>,

    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ShelterStatus>,

    #[validate(custom(function = "shared::validation::validate_head_count"))]
    #[serde(rename = "capacity", skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<i32>,

    #[validate(custom(function = "shared::validation::validate_head_count"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_occupancy: Option<i32>,

    #[validate(custom(function = "shared::validation::validate_latitude"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ShelterDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Payload for updating a shelter. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ShelterPatch {
    #[validate(length(min = 1, max = 150, message = "Name must be 1-150 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelter_type: Option<String>,

    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ShelterStatus>,

    #[validate(custom(function = "shared::validation::validate_head_count"))]
    #[serde(rename = "capacity", skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<i32>,

    #[validate(custom(function = "shared::validation::validate_head_count"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_occupancy: Option<i32>,

    #[validate(custom(function = "shared::validation::validate_latitude"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ShelterPatch {
    /// Applies the patch on top of `shelter`, returning the merged record.
    pub fn apply_to(&self, shelter: &Shelter) -> Shelter {
        let mut merged = shelter.clone();
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(shelter_type) = &self.shelter_type {
            merged.shelter_type = Some(shelter_type.clone());
        }
        if let Some(address) = &self.address {
            merged.address = Some(address.clone());
        }
        if let Some(region) = self.region {
            merged.region = Some(region);
        }
        if let Some(region_name) = &self.region_name {
            merged.region_name = Some(region_name.clone());
        }
        if let Some(status) = self.status {
            merged.status = status;
        }
        if let Some(max_capacity) = self.max_capacity {
            merged.max_capacity = max_capacity;
        }
        if let Some(current_occupancy) = self.current_occupancy {
            merged.current_occupancy = current_occupancy;
        }
        if let Some(latitude) = self.latitude {
            merged.latitude = Some(latitude);
        }
        if let Some(longitude) = self.longitude {
            merged.longitude = Some(longitude);
        }
        if let Some(contact_person) = &self.contact_person {
            merged.contact_person = Some(contact_person.clone());
        }
        if let Some(contact_number) = &self.contact_number {
            merged.contact_number = Some(contact_number.clone());
        }
        if let Some(notes) = &self.notes {
            merged.notes = Some(notes.clone());
        }
        merged
    }
}

/// A shelter as presented to a member of the public: the record plus the
/// distance and walking time computed from their position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyShelter {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub distance: Option<String>,
    #[serde(default)]
    pub walk_time: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl NearbyShelter {
    pub fn with_distance(mut self, distance: impl Into<String>, walk_time: impl Into<String>) -> Self {
        self.distance = Some(distance.into());
        self.walk_time = Some(walk_time.into());
        self
    }
}

impl From<&Shelter> for NearbyShelter {
    fn from(shelter: &Shelter) -> Self {
        Self {
            name: shelter.name.clone(),
            address: shelter.address.clone(),
            capacity: Some(shelter.max_capacity),
            distance: None,
            walk_time: None,
            latitude: shelter.latitude,
            longitude: shelter.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_json() -> &'static str {
        r#"{
            "id": 12,
            "name": "Butuan City Multipurpose Hall",
            "address": "Butuan City, Agusan del Norte",
            "latitude": "8.94830000",
            "longitude": "125.54010000",
            "region": 1,
            "region_name": "Agusan del Norte",
            "shelter_type": "hall",
            "capacity": 500,
            "current_occupancy": 320,
            "status": "active",
            "contact_person": "Maya Santos",
            "contact_number": "+63-85-225-0000",
            "notes": null,
            "created_at": "2025-01-10T08:00:00Z",
            "updated_at": "2025-01-11T09:30:00+08:00"
        }"#
    }

    #[test]
    fn test_shelter_deserialization_from_backend() {
        let shelter: Shelter = serde_json::from_str(backend_json()).unwrap();
        assert_eq!(shelter.id, 12);
        assert_eq!(shelter.max_capacity, 500);
        assert_eq!(shelter.latitude, Some(8.9483));
        assert_eq!(shelter.status, ShelterStatus::Active);
        assert!(shelter.notes.is_none());
        assert!(shelter.updated_at.is_some());
    }

    #[test]
    fn test_shelter_accepts_max_capacity_alias() {
        let json = r#"{"id": 1, "name": "Hall", "status": "full", "max_capacity": 280}"#;
        let shelter: Shelter = serde_json::from_str(json).unwrap();
        assert_eq!(shelter.max_capacity, 280);
        assert_eq!(shelter.current_occupancy, 0);
    }

    #[test]
    fn test_shelter_serializes_capacity_key() {
        let shelter: Shelter = serde_json::from_str(backend_json()).unwrap();
        let json = serde_json::to_value(&shelter).unwrap();
        assert_eq!(json["capacity"], 500);
        assert!(json.get("max_capacity").is_none());
    }

    #[test]
    fn test_occupancy_may_exceed_capacity() {
        let mut shelter: Shelter = serde_json::from_str(backend_json()).unwrap();
        shelter.current_occupancy = 650;
        assert_eq!(shelter.available_capacity(), 0);
    }

    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!("Active".parse::<ShelterStatus>(), Ok(ShelterStatus::Active));
        assert_eq!(" FULL ".parse::<ShelterStatus>(), Ok(ShelterStatus::Full));
        assert!("closed".parse::<ShelterStatus>().is_err());
        assert_eq!(ShelterStatus::Maintenance.to_string(), "maintenance");
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = ShelterDraft::new("Tandag Multipurpose Center");
        draft.latitude = Some(9.1478);
        draft.max_capacity = Some(360);
        assert!(draft.validate().is_ok());

        draft.latitude = Some(91.0);
        assert!(draft.validate().is_err());

        let empty = ShelterDraft::new("");
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_draft_skips_absent_fields() {
        let draft = ShelterDraft::new("Bislig Community Center");
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Bislig Community Center"}));
    }

    #[test]
    fn test_patch_apply_merges_only_present_fields() {
        let shelter: Shelter = serde_json::from_str(backend_json()).unwrap();
        let patch = ShelterPatch {
            status: Some(ShelterStatus::Full),
            current_occupancy: Some(500),
            ..Default::default()
        };

        let merged = patch.apply_to(&shelter);
        assert_eq!(merged.status, ShelterStatus::Full);
        assert_eq!(merged.current_occupancy, 500);
        assert_eq!(merged.name, shelter.name);
        assert_eq!(merged.max_capacity, 500);
    }

    #[test]
    fn test_nearby_shelter_from_record() {
        let shelter: Shelter = serde_json::from_str(backend_json()).unwrap();
        let nearby = NearbyShelter::from(&shelter).with_distance("1.2 km", "15 min walk");
        assert_eq!(nearby.capacity, Some(500));
        assert_eq!(nearby.distance.as_deref(), Some("1.2 km"));
        assert_eq!(nearby.latitude, Some(8.9483));
    }
}
