//! In-memory alert board used while developing without a backend.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::models::alert::{Alert, AlertStatus};

/// Upper bound (exclusive) of the minute jitter applied on refresh.
const REFRESH_JITTER_MINUTES: i64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AlertBoard {
    alerts: Vec<Alert>,
}

struct SeedAlert {
    location: &'static str,
    alert_type: &'static str,
    magnitude: f64,
    depth: f64,
    age: Duration,
    status: AlertStatus,
}

fn seed_alerts() -> [SeedAlert; 5] {
    [
        SeedAlert {
            location: "Butuan City, Agusan del Norte",
            alert_type: "Mainshock",
            magnitude: 4.5,
            depth: 12.0,
            age: Duration::hours(2),
            status: AlertStatus::Active,
        },
        SeedAlert {
            location: "Surigao City, Surigao del Norte",
            alert_type: "Mainshock",
            magnitude: 3.8,
            depth: 15.0,
            age: Duration::hours(5),
            status: AlertStatus::Acknowledged,
        },
        SeedAlert {
            location: "Tandag, Surigao del Sur",
            alert_type: "Mainshock",
            magnitude: 5.2,
            depth: 18.0,
            age: Duration::hours(24),
            status: AlertStatus::Resolved,
        },
        SeedAlert {
            location: "Butuan City, Agusan del Norte",
            alert_type: "Aftershock",
            magnitude: 3.2,
            depth: 10.0,
            age: Duration::hours(3),
            status: AlertStatus::Active,
        },
        SeedAlert {
            location: "Bislig, Surigao del Sur",
            alert_type: "Aftershock",
            magnitude: 2.9,
            depth: 14.0,
            age: Duration::days(2),
            status: AlertStatus::Resolved,
        },
    ]
}

fn build_alert(id: i64, seed: &SeedAlert, triggered_at: DateTime<Utc>, status: AlertStatus) -> Alert {
    Alert {
        id,
        alert_id: None,
        location: Some(seed.location.to_string()),
        alert_type: Some(seed.alert_type.to_string()),
        severity: None,
        magnitude: Some(seed.magnitude),
        depth: Some(seed.depth),
        description: None,
        earthquake: None,
        earthquake_event_id: None,
        shelter: None,
        shelter_name: None,
        status,
        triggered_at,
        acknowledged_at: None,
        resolved_at: None,
    }
}

impl AlertBoard {
    /// Board holding the five reference alerts, timestamped relative to `now`.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let alerts = seed_alerts()
            .iter()
            .enumerate()
            .map(|(idx, seed)| build_alert(idx as i64 + 1, seed, now - seed.age, seed.status))
            .collect();
        Self { alerts }
    }

    pub fn from_alerts(alerts: Vec<Alert>) -> Self {
        Self { alerts }
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn get(&self, id: i64) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    pub fn by_status(&self, status: AlertStatus) -> Vec<Alert> {
        self.alerts
            .iter()
            .filter(|a| a.status == status)
            .cloned()
            .collect()
    }

    /// Marks the alert with `id` acknowledged and returns it. Unknown ids
    /// leave the board untouched and return `None`.
    pub fn acknowledge(mut self, id: i64) -> (Self, Option<Alert>) {
        let target = self.alerts.iter_mut().find(|a| a.id == id).map(|alert| {
            alert.status = AlertStatus::Acknowledged;
            alert.clone()
        });
        (self, target)
    }

    /// Regenerates the board from the seed: fresh ids derived from `now`,
    /// timestamps up to nine minutes in the past, statuses cycling through
    /// active, acknowledged and resolved.
    pub fn refresh<R: Rng + ?Sized>(self, now: DateTime<Utc>, rng: &mut R) -> Self {
        let base_id = now.timestamp_millis();
        let alerts = seed_alerts()
            .iter()
            .enumerate()
            .map(|(idx, seed)| {
                let jitter = Duration::minutes(rng.gen_range(0..REFRESH_JITTER_MINUTES));
                let status = AlertStatus::CYCLE[idx % AlertStatus::CYCLE.len()];
                build_alert(base_id + idx as i64, seed, now - jitter, status)
            })
            .collect();
        Self { alerts }
    }
}
