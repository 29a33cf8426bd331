//! Authenticated operator client.

use domain::models::{
    Alert, AlertStatus, AuthUser, Earthquake, Evacuee, EvacueeDraft, LoginRequest, LoginResponse,
    Notification, Region, Report, ReportDraft, SafetyTip, Shelter, ShelterDraft, ShelterPatch,
    ShelterStatus, StoredRecommendation, User,
};
use shared::pagination::Paginated;
use tracing::{info, instrument, warn};
use validator::Validate;

use super::{message_field, paths, RestClient};
use crate::config::BackendConfig;
use crate::error::ClientError;
use crate::session::Session;

/// Client for the operator dashboard. Every request replays the stored
/// bearer token; a 401 expires the session.
#[derive(Debug, Clone)]
pub struct AdminClient {
    rest: RestClient,
    session: Session,
}

impl AdminClient {
    pub fn new(config: &BackendConfig, session: Session) -> Result<Self, ClientError> {
        Ok(Self {
            rest: RestClient::with_session(config, session.clone())?,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_user(&self) -> Result<Option<AuthUser>, ClientError> {
        self.session().user()
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Exchanges credentials for a token and persists both entries.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        request.validate()?;

        let response = self.rest.post_unauthenticated(paths::LOGIN, &request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Login rejected");
            let message =
                message_field(&body, &["error"]).unwrap_or_else(|| "Login failed".to_string());
            return Err(ClientError::Login(message));
        }

        let login: LoginResponse = serde_json::from_str(&body)?;
        self.session().save(&login)?;
        info!(user_id = login.user.id, "Logged in");
        Ok(login)
    }

    /// Forgets the stored credentials. The backend is not contacted.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.session().clear()
    }

    // ========================================================================
    // Shelters
    // ========================================================================

    pub async fn shelters(&self, page: u32) -> Result<Paginated<Shelter>, ClientError> {
        self.rest.get(&paths::shelters(page)).await
    }

    pub async fn shelter(&self, id: i64) -> Result<Shelter, ClientError> {
        self.rest.get(&paths::shelter(id)).await
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

    pub async fn create_shelter(&self, draft: &ShelterDraft) -> Result<Shelter, ClientError> {
        draft.validate()?;
        self.rest.post_json(paths::SHELTERS, draft).await
    }

    pub async fn update_shelter(&self, id: i64, patch: &ShelterPatch) -> Result<Shelter, ClientError> {
        patch.validate()?;
        self.rest.put_json(&paths::shelter(id), patch).await
    }

    pub async fn delete_shelter(&self, id: i64) -> Result<(), ClientError> {
        self.rest.delete(&paths::shelter(id)).await
    }

    // ========================================================================
    // Earthquakes and alerts
    // ========================================================================

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

    pub async fn alerts(&self, page: u32) -> Result<Paginated<Alert>, ClientError> {
        self.rest.get(&paths::alerts(page)).await
    }

    pub async fn alerts_by_status(&self, status: AlertStatus) -> Result<Vec<Alert>, ClientError> {
        self.rest.get(&paths::alerts_by_status(status)).await
    }

    pub async fn acknowledge_alert(&self, alert_id: i64) -> Result<Alert, ClientError> {
        self.rest.post(&paths::acknowledge_alert(alert_id)).await
    }

    // ========================================================================
    // Evacuees and reports
    // ========================================================================

    pub async fn evacuees(&self, page: u32) -> Result<Paginated<Evacuee>, ClientError> {
        self.rest.get(&paths::evacuees(page)).await
    }

    pub async fn evacuees_by_shelter(&self, shelter_id: i64) -> Result<Vec<Evacuee>, ClientError> {
        self.rest.get(&paths::evacuees_by_shelter(shelter_id)).await
    }

    pub async fn create_evacuee(&self, draft: &EvacueeDraft) -> Result<Evacuee, ClientError> {
        draft.validate()?;
        self.rest.post_json(paths::EVACUEES, draft).await
    }

    pub async fn reports(&self, page: u32) -> Result<Paginated<Report>, ClientError> {
        self.rest.get(&paths::reports(page)).await
    }

    pub async fn reports_by_shelter(&self, shelter_id: i64) -> Result<Vec<Report>, ClientError> {
        self.rest.get(&paths::reports_by_shelter(shelter_id)).await
    }

    pub async fn create_report(&self, draft: &ReportDraft) -> Result<Report, ClientError> {
        draft.validate()?;
        self.rest.post_json(paths::REPORTS, draft).await
    }

    // ========================================================================
    // Safety tips and stored recommendations
    // ========================================================================

    pub async fn safety_tips(&self, page: u32) -> Result<Paginated<SafetyTip>, ClientError> {
        self.rest.get(&paths::safety_tips(page)).await
    }

    pub async fn safety_tips_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<SafetyTip>, ClientError> {
        self.rest.get(&paths::safety_tips_by_category(category)).await
    }

    pub async fn ai_recommendations(
        &self,
        page: u32,
    ) -> Result<Paginated<StoredRecommendation>, ClientError> {
        self.rest.get(&paths::ai_recommendations(page)).await
    }

    pub async fn ai_recommendations_by_shelter(
        &self,
        shelter_id: i64,
    ) -> Result<Vec<StoredRecommendation>, ClientError> {
        self.rest
            .get(&paths::ai_recommendations_by_shelter(shelter_id))
            .await
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub async fn notifications(&self, page: u32) -> Result<Paginated<Notification>, ClientError> {
        self.rest.get(&paths::notifications(page)).await
    }

    pub async fn unread_notifications(&self) -> Result<Vec<Notification>, ClientError> {
        self.rest.get(paths::NOTIFICATIONS_UNREAD).await
    }

    pub async fn mark_notification_as_read(
        &self,
        notification_id: i64,
    ) -> Result<Notification, ClientError> {
        self.rest
            .post(&paths::mark_notification_as_read(notification_id))
            .await
    }

    // ========================================================================
    // Regions and users
    // ========================================================================

    pub async fn regions(&self) -> Result<Paginated<Region>, ClientError> {
        self.rest.get(paths::REGIONS).await
    }

    pub async fn users(&self) -> Result<Paginated<User>, ClientError> {
        self.rest.get(paths::USERS).await
    }

    pub async fn user(&self, id: i64) -> Result<User, ClientError> {
        self.rest.get(&paths::user(id)).await
    }
}
