//! Citizen-facing safety advice.

use chrono::Utc;
use domain::models::{RouteAnalysis, SafetyRecommendations, SafetyRoutes};
use domain::services::location_context;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::chat::{ChatClient, ChatMessage, Sampling};
use super::fence::parse_answer;
use super::prompt::{self, RouteCheck, RouteQuery, SafetyQuery, TipContext};
use crate::config::{AiConfig, PromptLimits};
use crate::error::ClientError;

const SAFETY_SAMPLING: Sampling = Sampling::analysis(0.7, 2500);
const ROUTES_SAMPLING: Sampling = Sampling::analysis(0.6, 3000);
const ROUTE_ANALYSIS_SAMPLING: Sampling = Sampling::brief(0.3, 400);
const TIP_SAMPLING: Sampling = Sampling::brief(0.5, 100);

pub const UNCONFIGURED_TIP: &str = "Stay alert and follow local emergency guidelines.";
pub const EMPTY_TIP: &str = "Stay safe and follow local emergency guidelines.";
pub const FAILED_TIP: &str = "Remember: Drop, Cover, and Hold during an earthquake.";

/// Marker appended to the first attempt so repeated questions are not
/// answered from a cache.
pub fn request_id_suffix() -> String {
    let nonce = Uuid::new_v4().simple().to_string();
    format!(
        "\n\n[Request ID: {}-{}]",
        Utc::now().timestamp_millis(),
        &nonce[..9]
    )
}

/// Location-aware advice for the public site.
#[derive(Debug, Clone)]
pub struct SafetyAdvisor {
    chat: ChatClient,
    limits: PromptLimits,
}

impl SafetyAdvisor {
    pub fn new(config: &AiConfig) -> Result<Self, ClientError> {
        Ok(Self::with_chat(ChatClient::new(config)?, config.public_limits))
    }

    pub fn with_chat(chat: ChatClient, limits: PromptLimits) -> Self {
        Self { chat, limits }
    }

    /// Personalised recommendations for the caller's province and city.
    #[instrument(skip_all, fields(city = ?query.location.city))]
    pub async fn generate_safety_recommendations(
        &self,
        query: &SafetyQuery,
    ) -> Result<SafetyRecommendations, ClientError> {
        if !self.chat.has_api_key() {
            return Err(ClientError::MissingApiKey);
        }

        let ctx = location_context(
            query.location.province.as_deref(),
            query.location.city.as_deref(),
        );
        let prompt = prompt::safety_recommendations(query, &ctx, self.limits);
        let suffix = request_id_suffix();

        let content = self
            .chat
            .complete_with_fallback(&prompt.system, &prompt.user, Some(&suffix), SAFETY_SAMPLING)
            .await?;

        match parse_answer::<SafetyRecommendations>(&content) {
            Ok(answer) => {
                info!(
                    shelters = answer.shelter_recommendations.len(),
                    "Safety recommendations generated"
                );
                Ok(answer)
            }
            Err(e) => {
                warn!(error = %e, "Failed to parse AI response, returning degraded answer");
                Ok(SafetyRecommendations::degraded(&content))
            }
        }
    }

    /// Evacuation routes towards the listed shelters. An unparseable answer
    /// is replaced by generic routes to the first shelters.
    #[instrument(skip_all, fields(city = ?query.location.city))]
    pub async fn generate_safety_routes(
        &self,
        query: &RouteQuery,
    ) -> Result<SafetyRoutes, ClientError> {
        if !self.chat.has_api_key() {
            return Err(ClientError::MissingApiKey);
        }

        let ctx = location_context(
            query.location.province.as_deref(),
            query.location.city.as_deref(),
        );
        let prompt = prompt::safety_routes(query, &ctx, self.limits);

        let content = self
            .chat
            .complete_with_fallback(&prompt.system, &prompt.user, None, ROUTES_SAMPLING)
            .await?;

        match parse_answer::<SafetyRoutes>(&content) {
            Ok(routes) => Ok(routes),
            Err(e) => {
                warn!(error = %e, "Failed to parse AI route response, using generic routes");
                Ok(SafetyRoutes::fallback(&query.shelters, &content))
            }
        }
    }

    /// Safety of one route. Never fails.
    pub async fn analyze_evacuation_route(&self, check: &RouteCheck) -> RouteAnalysis {
        if !self.chat.has_api_key() {
            return RouteAnalysis::unconfigured();
        }

        let prompt = prompt::route_analysis(check);
        let messages = [
            ChatMessage::system(prompt.system),
            ChatMessage::user(prompt.user),
        ];

        let result = self
            .chat
            .complete(self.chat.fallback_model(), &messages, ROUTE_ANALYSIS_SAMPLING)
            .await
            .and_then(|content| parse_answer::<RouteAnalysis>(&content).map_err(ClientError::from));

        result.unwrap_or_else(|e| {
            warn!(error = %e, "Route analysis failed");
            RouteAnalysis::unavailable()
        })
    }

    /// One-sentence tip. Never fails.
    pub async fn quick_safety_tip(&self, context: &TipContext) -> String {
        if !self.chat.has_api_key() {
            return UNCONFIGURED_TIP.to_string();
        }

        let prompt = prompt::public_tip(context);
        let messages = [
            ChatMessage::system(prompt.system),
            ChatMessage::user(prompt.user),
        ];

        match self
            .chat
            .complete(self.chat.fallback_model(), &messages, TIP_SAMPLING)
            .await
        {
            Ok(tip) => tip,
            Err(ClientError::EmptyCompletion) => EMPTY_TIP.to_string(),
            Err(e) => {
                warn!(error = %e, "Quick tip generation failed");
                FAILED_TIP.to_string()
            }
        }
    }
}
