//! Request path templates, relative to the configured base URL.
//!
//! Parameters, page numbers included, are substituted verbatim; only the
//! free-text `city` is percent-encoded, with a space sent as `%20`.

use std::fmt::Display;

pub const LOGIN: &str = "/auth/login/";
pub const SHELTERS: &str = "/shelters/";
pub const EARTHQUAKES_RECENT: &str = "/earthquakes/recent/";
pub const EVACUEES: &str = "/evacuees/";
pub const REPORTS: &str = "/reports/";
pub const NOTIFICATIONS_UNREAD: &str = "/notifications/unread/";
pub const REGIONS: &str = "/regions/";
pub const USERS: &str = "/users/";
pub const PREDICTIONS: &str = "/predictions/";
pub const STATISTICS: &str = "/statistics/";

fn page_of(resource: &str, page: u32) -> String {
    format!("/{}/?page={}", resource, page)
}

// Shelters

pub fn shelters(page: u32) -> String {
    page_of("shelters", page)
}

pub fn shelter(id: i64) -> String {
    format!("/shelters/{}/", id)
}

pub fn shelters_by_region(region_id: i64) -> String {
    format!("/shelters/by_region/?region_id={}", region_id)
}

pub fn shelters_by_status(status: impl Display) -> String {
    format!("/shelters/by_status/?status={}", status)
}

pub fn shelters_by_location(city: &str) -> String {
    // byte_serialize already escapes a literal '+' as %2B
    let city: String = url::form_urlencoded::byte_serialize(city.as_bytes()).collect();
    format!("/shelters/by_location/?city={}", city.replace('+', "%20"))
}

// Earthquakes

pub fn earthquakes(page: u32) -> String {
    page_of("earthquakes", page)
}

pub fn earthquakes_by_region(region_id: i64) -> String {
    format!("/earthquakes/by_region/?region_id={}", region_id)
}

pub fn earthquakes_by_location(latitude: f64, longitude: f64, radius_km: f64) -> String {
    format!(
        "/earthquakes/by_location/?latitude={}&longitude={}&radius={}",
        latitude, longitude, radius_km
    )
}

// Alerts

pub fn alerts(page: u32) -> String {
    page_of("alerts", page)
}

pub fn alerts_by_status(status: impl Display) -> String {
    format!("/alerts/by_status/?status={}", status)
}

pub fn acknowledge_alert(alert_id: i64) -> String {
    format!("/alerts/{}/acknowledge/", alert_id)
}

// Evacuees and reports

pub fn evacuees(page: u32) -> String {
    page_of("evacuees", page)
}

pub fn evacuees_by_shelter(shelter_id: i64) -> String {
    format!("/evacuees/by_shelter/?shelter_id={}", shelter_id)
}

pub fn reports(page: u32) -> String {
    page_of("reports", page)
}

pub fn reports_by_shelter(shelter_id: i64) -> String {
    format!("/reports/by_shelter/?shelter_id={}", shelter_id)
}

// Safety tips

pub fn safety_tips(page: u32) -> String {
    page_of("safety-tips", page)
}

pub fn safety_tips_by_category(category: &str) -> String {
    format!("/safety-tips/by_category/?category={}", category)
}

// Stored AI recommendations

pub fn ai_recommendations(page: u32) -> String {
    page_of("ai-recommendations", page)
}

pub fn ai_recommendations_by_shelter(shelter_id: i64) -> String {
    format!("/ai-recommendations/by_shelter/?shelter_id={}", shelter_id)
}

// Notifications

pub fn notifications(page: u32) -> String {
    page_of("notifications", page)
}

pub fn mark_notification_as_read(notification_id: i64) -> String {
    format!("/notifications/{}/mark_as_read/", notification_id)
}

// Users

pub fn user(id: i64) -> String {
    format!("/users/{}/", id)
}
