//! In-app notification model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A notification addressed to an admin user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    #[serde(default)]
    pub user: Option<i64>,
    #[serde(default)]
    pub user_username: Option<String>,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    #[serde(default)]
    pub related_entity_type: Option<String>,
    #[serde(default)]
    pub related_entity_id: Option<i64>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub read_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
