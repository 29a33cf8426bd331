//! Anonymous client for the public-facing site.

use domain::models::{
    Alert, AlertStatus, Earthquake, EarthquakePredictions, EarthquakeStatistics,
    NearbyEarthquakes, Region, SafetyTip, Shelter, ShelterStatus,
};
use shared::pagination::Paginated;
use shared::validation::{validate_latitude, validate_longitude, validate_radius_km};

use super::{paths, RestClient};
use crate::config::BackendConfig;
use crate::error::ClientError;

/// Search radius used when the caller gives none.
pub const DEFAULT_RADIUS_KM: f64 = 50.0;

/// Read-only client. Sends no credentials; a 401 is an ordinary error.
#[derive(Debug, Clone)]
pub struct PublicClient {
    rest: RestClient,
}

impl PublicClient {
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        Ok(Self {
            rest: RestClient::new(config)?,
        })
    }

    pub async fn shelters(&self, page: u32) -> Result<Paginated<Shelter>, ClientError> {
        self.rest.get(&paths::shelters(page)).await
    }

    pub async fn shelters_by_region(&self, region_id: i64) -> Result<Vec<Shelter>, ClientError> {
        self.rest.get(&paths::shelters_by_region(region_id)).await
    }

    pub async fn shelters_by_status(
        &self,
        status: ShelterStatus,
    ) -> Result<Vec<Shelter>, ClientError> {
        self.rest.get(&paths::shelters_by_status(status)).await
    }

    /// Shelters whose address mentions `city`.
    pub async fn shelters_by_location(&self, city: &str) -> Result<Vec<Shelter>, ClientError> {
        self.rest.get(&paths::shelters_by_location(city)).await
    }

    pub async fn earthquakes(&self, page: u32) -> Result<Paginated<Earthquake>, ClientError> {
        self.rest.get(&paths::earthquakes(page)).await
    }

    pub async fn recent_earthquakes(&self) -> Result<Vec<Earthquake>, ClientError> {
        self.rest.get(paths::EARTHQUAKES_RECENT).await
    }

    pub async fn earthquakes_by_region(
        &self,
        region_id: i64,
    ) -> Result<Vec<Earthquake>, ClientError> {
        self.rest.get(&paths::earthquakes_by_region(region_id)).await
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

        self.rest
            .get(&paths::earthquakes_by_location(latitude, longitude, radius_km))
            .await
    }

    pub async fn alerts(&self, page: u32) -> Result<Paginated<Alert>, ClientError> {
        self.rest.get(&paths::alerts(page)).await
    }

    pub async fn alerts_by_status(&self, status: AlertStatus) -> Result<Vec<Alert>, ClientError> {
        self.rest.get(&paths::alerts_by_status(status)).await
    }

    pub async fn safety_tips(&self, page: u32) -> Result<Paginated<SafetyTip>, ClientError> {
        self.rest.get(&paths::safety_tips(page)).await
    }

    pub async fn safety_tips_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<SafetyTip>, ClientError> {
        self.rest.get(&paths::safety_tips_by_category(category)).await
    }

    /// Predicted high-risk zones derived from the earthquake history.
    pub async fn earthquake_predictions(&self) -> Result<EarthquakePredictions, ClientError> {
        self.rest.get(paths::PREDICTIONS).await
    }

    pub async fn earthquake_statistics(&self) -> Result<EarthquakeStatistics, ClientError> {
        self.rest.get(paths::STATISTICS).await
    }

    pub async fn regions(&self) -> Result<Paginated<Region>, ClientError> {
        self.rest.get(paths::REGIONS).await
    }
}
