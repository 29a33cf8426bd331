//! In-process stand-in for the backend, served from the seeded boards.

use std::time::Duration;

use chrono::Utc;
use domain::models::{
    Alert, AlertStatus, Earthquake, NearbyEarthquakes, SearchLocation, Shelter, ShelterDraft,
    ShelterPatch, ShelterStatus,
};
use domain::services::{seeded_earthquakes, within_radius, AlertBoard, ShelterBoard};
use shared::pagination::{paginate, Paginated, DEFAULT_PAGE_SIZE};
use shared::validation::{validate_latitude, validate_longitude, validate_radius_km};
use tokio::sync::RwLock;
use tracing::{debug, info};
use validator::Validate;

use crate::config::MockConfig;
use crate::error::ClientError;
use crate::rest::public::DEFAULT_RADIUS_KM;
use crate::source::DataSource;

fn not_found() -> ClientError {
    ClientError::Http {
        status: 404,
        message: "Not found.".to_string(),
    }
}

/// Mock backend with an artificial per-call delay.
#[derive(Debug)]
pub struct MockBackend {
    shelters: RwLock<ShelterBoard>,
    alerts: RwLock<AlertBoard>,
    earthquakes: Vec<Earthquake>,
    latency: Duration,
}

impl MockBackend {
    pub fn new(latency: Duration) -> Self {
        let now = Utc::now();
        Self {
            shelters: RwLock::new(ShelterBoard::seeded()),
            alerts: RwLock::new(AlertBoard::seeded(now)),
            earthquakes: seeded_earthquakes(now),
            latency,
        }
    }

    pub fn from_config(config: &MockConfig) -> Self {
        Self::new(config.latency())
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Restores the five seed shelters.
    pub async fn reset_shelters(&self) {
        let mut board = self.shelters.write().await;
        *board = board.clone().reset();
        info!("Mock shelters reset");
    }

    /// Regenerates the alert list with fresh ids and timestamps.
    pub async fn refresh_alerts(&self) -> Vec<Alert> {
        self.delay().await;
        let mut board = self.alerts.write().await;
        *board = board.clone().refresh(Utc::now(), &mut rand::thread_rng());
        board.alerts().to_vec()
    }

    /// Shelters whose address mentions `city`, ignoring case.
    pub async fn shelters_by_location(&self, city: &str) -> Result<Vec<Shelter>, ClientError> {
        self.delay().await;
        Ok(self.shelters.read().await.by_city(city))
    }

    /// Earthquakes within `radius_km` (default 50) of a point.
    pub async fn earthquakes_by_location(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: Option<f64>,
    ) -> Result<NearbyEarthquakes, ClientError> {
        let radius_km = radius_km.unwrap_or(DEFAULT_RADIUS_KM);
        validate_latitude(latitude)?;
        validate_longitude(longitude)?;
        validate_radius_km(radius_km)?;
        self.delay().await;

        let earthquakes = within_radius(&self.earthquakes, latitude, longitude, radius_km);
        Ok(NearbyEarthquakes {
            count: earthquakes.len(),
            search_location: SearchLocation {
                latitude,
                longitude,
                radius_km,
            },
            earthquakes,
        })
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::from_config(&MockConfig::default())
    }
}

#[async_trait::async_trait]
impl DataSource for MockBackend {
    async fn shelters(&self, page: u32) -> Result<Paginated<Shelter>, ClientError> {
        self.delay().await;
        let board = self.shelters.read().await;
        Ok(paginate(board.shelters(), page, DEFAULT_PAGE_SIZE))
    }

    async fn shelter(&self, id: i64) -> Result<Shelter, ClientError> {
        self.delay().await;
        self.shelters.read().await.get(id).cloned().ok_or_else(not_found)
    }

    async fn shelters_by_status(&self, status: ShelterStatus) -> Result<Vec<Shelter>, ClientError> {
        self.delay().await;
        Ok(self.shelters.read().await.by_status(status))
    }

    async fn shelters_by_region(&self, region_id: i64) -> Result<Vec<Shelter>, ClientError> {
        self.delay().await;
        Ok(self.shelters.read().await.by_region(region_id))
    }

    async fn create_shelter(&self, draft: &ShelterDraft) -> Result<Shelter, ClientError> {
        draft.validate()?;
        self.delay().await;

        let mut board = self.shelters.write().await;
        let (next, shelter) = board.clone().add(draft.clone());
        *board = next;
        debug!(shelter_id = shelter.id, "Mock shelter created");
        Ok(shelter)
    }

    async fn update_shelter(&self, id: i64, patch: &ShelterPatch) -> Result<Shelter, ClientError> {
        patch.validate()?;
        self.delay().await;

        let mut board = self.shelters.write().await;
        let (next, updated) = board.clone().update(id, patch);
        *board = next;
        updated.ok_or_else(not_found)
    }

    async fn delete_shelter(&self, id: i64) -> Result<(), ClientError> {
        self.delay().await;

        let mut board = self.shelters.write().await;
        let (next, removed) = board.clone().remove(id);
        *board = next;
        removed.map(|_| ()).ok_or_else(not_found)
    }

    async fn earthquakes(&self, page: u32) -> Result<Paginated<Earthquake>, ClientError> {
        self.delay().await;
        Ok(paginate(&self.earthquakes, page, DEFAULT_PAGE_SIZE))
    }

    async fn recent_earthquakes(&self) -> Result<Vec<Earthquake>, ClientError> {
        self.delay().await;
        Ok(self.earthquakes.clone())
    }

    async fn alerts(&self, page: u32) -> Result<Paginated<Alert>, ClientError> {
        self.delay().await;
        let board = self.alerts.read().await;
        Ok(paginate(board.alerts(), page, DEFAULT_PAGE_SIZE))
    }

    async fn alerts_by_status(&self, status: AlertStatus) -> Result<Vec<Alert>, ClientError> {
        self.delay().await;
        Ok(self.alerts.read().await.by_status(status))
    }

    async fn acknowledge_alert(&self, alert_id: i64) -> Result<Alert, ClientError> {
        self.delay().await;

        let mut board = self.alerts.write().await;
        let (next, acknowledged) = board.clone().acknowledge(alert_id);
        *board = next;
        acknowledged.ok_or_else(not_found)
    }
}
