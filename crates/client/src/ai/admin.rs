//! Operator-facing recommendations.

use domain::models::{AdminRecommendation, AreaRiskAssessment};
use tracing::{info, instrument, warn};

use super::chat::{ChatClient, ChatMessage, Sampling};
use super::fence::parse_answer;
use super::prompt::{self, AdminContext, AreaQuery};
use crate::config::{AiConfig, PromptLimits};
use crate::error::ClientError;

const RECOMMENDATION_SAMPLING: Sampling = Sampling::analysis(0.7, 2000);
const TIP_SAMPLING: Sampling = Sampling::brief(0.5, 100);
const AREA_RISK_SAMPLING: Sampling = Sampling::brief(0.3, 500);

pub const EMPTY_TIP: &str = "Stay safe and follow local emergency guidelines.";
pub const FAILED_TIP: &str = "Stay alert and follow official evacuation instructions.";

/// Situation analysis for the operator dashboard.
#[derive(Debug, Clone)]
pub struct RecommendationService {
    chat: ChatClient,
    limits: PromptLimits,
}

impl RecommendationService {
    pub fn new(config: &AiConfig) -> Result<Self, ClientError> {
        Ok(Self::with_chat(ChatClient::new(config)?, config.admin_limits))
    }

    pub fn with_chat(chat: ChatClient, limits: PromptLimits) -> Self {
        Self { chat, limits }
    }

    /// Analyses shelters, earthquakes and alerts.
    ///
    /// Transport and API errors propagate. An answer that is not valid JSON
    /// of the expected shape comes back degraded, carrying the raw text.
    #[instrument(skip_all, fields(shelters = ctx.shelters.len()))]
    pub async fn generate_recommendations(
        &self,
        ctx: &AdminContext<'_>,
    ) -> Result<AdminRecommendation, ClientError> {
        if !self.chat.has_api_key() {
            return Err(ClientError::MissingApiKey);
        }

        let prompt = prompt::admin_recommendations(ctx, self.limits);
        let content = self
            .chat
            .complete_with_fallback(&prompt.system, &prompt.user, None, RECOMMENDATION_SAMPLING)
            .await?;

        match parse_answer::<AdminRecommendation>(&content) {
            Ok(answer) => {
                info!(
                    recommendations = answer.recommendations.len(),
                    "AI recommendations generated"
                );
                Ok(answer)
            }
            Err(e) => {
                warn!(error = %e, "Failed to parse AI response, returning degraded answer");
                Ok(AdminRecommendation::degraded(&content))
            }
        }
    }

    /// One-sentence tip for `context`. Only a missing key is an error.
    pub async fn quick_safety_tip(&self, context: &str) -> Result<String, ClientError> {
        if !self.chat.has_api_key() {
            return Err(ClientError::MissingApiKey);
        }

        let prompt = prompt::admin_tip(context);
        let messages = [
            ChatMessage::system(prompt.system),
            ChatMessage::user(prompt.user),
        ];

        match self
            .chat
            .complete(self.chat.fallback_model(), &messages, TIP_SAMPLING)
            .await
        {
            Ok(tip) => Ok(tip),
            Err(ClientError::EmptyCompletion) => Ok(EMPTY_TIP.to_string()),
            Err(e) => {
                warn!(error = %e, "Quick tip generation failed");
                Ok(FAILED_TIP.to_string())
            }
        }
    }

    /// Seismic risk of a single area. Only a missing key is an error; any
    /// other failure yields [`AreaRiskAssessment::unavailable`].
    pub async fn analyze_area_risk(
        &self,
        query: &AreaQuery,
    ) -> Result<AreaRiskAssessment, ClientError> {
        if !self.chat.has_api_key() {
            return Err(ClientError::MissingApiKey);
        }

        let prompt = prompt::area_risk(query);
        let messages = [
            ChatMessage::system(prompt.system),
            ChatMessage::user(prompt.user),
        ];

        let content = match self
            .chat
            .complete(self.chat.fallback_model(), &messages, AREA_RISK_SAMPLING)
            .await
        {
            Ok(content) => content,
            Err(e) => {
                warn!(error = %e, area = %query.name, "Risk analysis failed");
                return Ok(AreaRiskAssessment::unavailable());
            }
        };

        Ok(parse_answer(&content).unwrap_or_else(|e| {
            warn!(error = %e, area = %query.name, "Unparseable risk analysis");
            AreaRiskAssessment::unavailable()
        }))
    }
}
