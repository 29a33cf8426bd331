//! Safety tip domain model.

use serde::{Deserialize, Serialize};

/// A curated safety tip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyTip {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// before_earthquake, during_earthquake, after_earthquake, evacuation
    /// or shelter_safety.
    pub category: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
