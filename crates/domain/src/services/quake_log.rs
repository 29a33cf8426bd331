//! Reference earthquake log served by the mock backend.

use chrono::{DateTime, Duration, Utc};

use crate::models::earthquake::Earthquake;

/// Mean earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Earthquakes matching the alert seed, newest first.
pub fn seeded_earthquakes(now: DateTime<Utc>) -> Vec<Earthquake> {
    let rows: [(i64, f64, f64, f64, f64, i64, &str, &str, Duration); 5] = [
        (1, 4.5, 12.0, 8.9483, 125.5401, 1, "Agusan del Norte", "main_shock", Duration::hours(2)),
        (4, 3.2, 10.0, 8.9550, 125.5600, 1, "Agusan del Norte", "aftershock", Duration::hours(3)),
        (2, 3.8, 15.0, 9.7900, 125.4950, 3, "Surigao del Norte", "main_shock", Duration::hours(5)),
        (3, 5.2, 18.0, 9.1478, 126.1977, 4, "Surigao del Sur", "main_shock", Duration::hours(24)),
        (5, 2.9, 14.0, 8.0605, 126.4040, 4, "Surigao del Sur", "aftershock", Duration::days(2)),
    ];

    rows.into_iter()
        .map(
            |(id, magnitude, depth, lat, lon, region, region_name, event_type, age)| Earthquake {
                id,
                event_id: Some(format!("EQ-MOCK-{:04}", id)),
                magnitude,
                depth: Some(depth),
                latitude: Some(lat),
                longitude: Some(lon),
                region: Some(region),
                region_name: Some(region_name.to_string()),
                event_type: Some(event_type.to_string()),
                description: None,
                intensity: None,
                triggered_at: now - age,
                recorded_at: None,
            },
        )
        .collect()
}

/// Earthquakes within `radius_km` of the given point.
pub fn within_radius(quakes: &[Earthquake], lat: f64, lon: f64, radius_km: f64) -> Vec<Earthquake> {
    quakes
        .iter()
        .filter(|q| match (q.latitude, q.longitude) {
            (Some(q_lat), Some(q_lon)) => haversine_km(lat, lon, q_lat, q_lon) <= radius_km,
            _ => false,
        })
        .cloned()
        .collect()
}
