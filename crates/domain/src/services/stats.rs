//! Dashboard aggregates computed from shelter and alert lists.

use serde::{Deserialize, Serialize};

use crate::models::alert::{Alert, AlertStatus};
use crate::models::shelter::{Shelter, ShelterStatus};

/// Situation counters fed to the admin analysis prompt.
///
/// `total_evacuees` is the summed occupancy of the listed shelters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelterStats {
    pub total_shelters: usize,
    pub active_shelters: usize,
    pub full_capacity_shelters: usize,
    pub maintenance_shelters: usize,
    pub active_alerts: usize,
    pub total_evacuees: i64,
}

impl ShelterStats {
    pub fn compute(shelters: &[Shelter], alerts: &[Alert]) -> Self {
        let count = |status: ShelterStatus| shelters.iter().filter(|s| s.status == status).count();

        Self {
            total_shelters: shelters.len(),
            active_shelters: count(ShelterStatus::Active),
            full_capacity_shelters: count(ShelterStatus::Full),
            maintenance_shelters: count(ShelterStatus::Maintenance),
            active_alerts: alerts
                .iter()
                .filter(|a| a.status == AlertStatus::Active)
                .count(),
            total_evacuees: shelters.iter().map(|s| i64::from(s.current_occupancy)).sum(),
        }
    }
}
