//! Evacuee domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration status of an evacuee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvacueeStatus {
    Evacuated,
    Safe,
    Departed,
    Pending,
}

/// A person registered at a shelter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evacuee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub shelter: i64,
    #[serde(default)]
    pub shelter_name: Option<String>,
    #[serde(default)]
    pub check_in_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_out_time: Option<DateTime<Utc>>,
    pub status: EvacueeStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Evacuee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload for registering an evacuee.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EvacueeDraft {
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,

    pub shelter: i64,

    #[validate(email(message = "Invalid email format"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[validate(range(min = 0, max = 130, message = "Age must be between 0 and 130"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EvacueeStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
