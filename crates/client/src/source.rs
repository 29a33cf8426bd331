//! The data operations shared by the live backend and the mock backend.

use domain::models::{
    Alert, AlertStatus, Earthquake, Shelter, ShelterDraft, ShelterPatch, ShelterStatus,
};
use shared::pagination::Paginated;

use crate::error::ClientError;
use crate::rest::AdminClient;

/// Shelter, earthquake and alert operations of the operator dashboard.
///
/// Lookups and mutations by id fail with `ClientError::Http { status: 404 }`
/// ("Not found.") when the id is unknown, on the mock backend as on the live
/// one; nothing is changed in that case.
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    async fn shelters(&self, page: u32) -> Result<Paginated<Shelter>, ClientError>;

    async fn shelter(&self, id: i64) -> Result<Shelter, ClientError>;

    async fn shelters_by_status(&self, status: ShelterStatus) -> Result<Vec<Shelter>, ClientError>;

    async fn shelters_by_region(&self, region_id: i64) -> Result<Vec<Shelter>, ClientError>;

    async fn create_shelter(&self, draft: &ShelterDraft) -> Result<Shelter, ClientError>;

    async fn update_shelter(&self, id: i64, patch: &ShelterPatch) -> Result<Shelter, ClientError>;

    async fn delete_shelter(&self, id: i64) -> Result<(), ClientError>;

    async fn earthquakes(&self, page: u32) -> Result<Paginated<Earthquake>, ClientError>;

    async fn recent_earthquakes(&self) -> Result<Vec<Earthquake>, ClientError>;

    async fn alerts(&self, page: u32) -> Result<Paginated<Alert>, ClientError>;

    async fn alerts_by_status(&self, status: AlertStatus) -> Result<Vec<Alert>, ClientError>;

    /// Marks one alert acknowledged. An unknown id is a 404 and leaves every
    /// alert untouched.
    async fn acknowledge_alert(&self, alert_id: i64) -> Result<Alert, ClientError>;
}

#[async_trait::async_trait]
impl DataSource for AdminClient {
    async fn shelters(&self, page: u32) -> Result<Paginated<Shelter>, ClientError> {
        AdminClient::shelters(self, page).await
    }

    async fn shelter(&self, id: i64) -> Result<Shelter, ClientError> {
        AdminClient::shelter(self, id).await
    }

    async fn shelters_by_status(&self, status: ShelterStatus) -> Result<Vec<Shelter>, ClientError> {
        AdminClient::shelters_by_status(self, status).await
    }

    async fn shelters_by_region(&self, region_id: i64) -> Result<Vec<Shelter>, ClientError> {
        AdminClient::shelters_by_region(self, region_id).await
    }

    async fn create_shelter(&self, draft: &ShelterDraft) -> Result<Shelter, ClientError> {
        AdminClient::create_shelter(self, draft).await
    }

    async fn update_shelter(&self, id: i64, patch: &ShelterPatch) -> Result<Shelter, ClientError> {
        AdminClient::update_shelter(self, id, patch).await
    }

    async fn delete_shelter(&self, id: i64) -> Result<(), ClientError> {
        AdminClient::delete_shelter(self, id).await
    }

    async fn earthquakes(&self, page: u32) -> Result<Paginated<Earthquake>, ClientError> {
        AdminClient::earthquakes(self, page).await
    }

    async fn recent_earthquakes(&self) -> Result<Vec<Earthquake>, ClientError> {
        AdminClient::recent_earthquakes(self).await
    }

    async fn alerts(&self, page: u32) -> Result<Paginated<Alert>, ClientError> {
        AdminClient::alerts(self, page).await
    }

    async fn alerts_by_status(&self, status: AlertStatus) -> Result<Vec<Alert>, ClientError> {
        AdminClient::alerts_by_status(self, status).await
    }

    async fn acknowledge_alert(&self, alert_id: i64) -> Result<Alert, ClientError> {
        AdminClient::acknowledge_alert(self, alert_id).await
    }
}
