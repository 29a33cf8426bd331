//! Chat-completion transport (OpenAI-compatible, served by Groq).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AiConfig;
use crate::error::ClientError;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Sampling parameters. `top_p` and `stream` are omitted when unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sampling {
    pub temperature: f64,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl Sampling {
    /// Settings for the long structured analyses.
    pub const fn analysis(temperature: f64, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
            top_p: Some(1.0),
            stream: Some(false),
        }
    }

    /// Settings for the short auxiliary prompts.
    pub const fn brief(temperature: f64, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
            top_p: None,
            stream: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(flatten)]
    sampling: Sampling,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Sends chat completions and retries rejected models once.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    api_url: String,
    api_key: Option<String>,
    primary_model: String,
    fallback_model: String,
}

impl ChatClient {
    pub fn new(config: &AiConfig) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.api_key().map(str::to_string),
            primary_model: config.primary_model.clone(),
            fallback_model: config.fallback_model.clone(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn primary_model(&self) -> &str {
        &self.primary_model
    }

    pub fn fallback_model(&self) -> &str {
        &self.fallback_model
    }

    /// One completion against `model`. Returns the first choice's content.
    pub async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        sampling: Sampling,
    ) -> Result<String, ClientError> {
        let api_key = self.api_key.as_deref().ok_or(ClientError::MissingApiKey)?;

        let request = ChatRequest {
            model,
            messages,
            sampling,
        };

        debug!(model = %model, max_tokens = sampling.max_tokens, "Requesting chat completion");

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|e| e.error)
                .and_then(|e| e.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("Groq API error: {}", status.as_u16()));
            return Err(ClientError::Completion {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|c| !c.is_empty())
            .ok_or(ClientError::EmptyCompletion)
    }

    /// Asks the primary model and, when it rejects the request with 400 or
    /// 404, the fallback model with the same messages.
    ///
    /// `primary_suffix` is appended to the user message of the first attempt
    /// only.
    pub async fn complete_with_fallback(
        &self,
        system: &str,
        user: &str,
        primary_suffix: Option<&str>,
        sampling: Sampling,
    ) -> Result<String, ClientError> {
        let first_user = match primary_suffix {
            Some(suffix) => format!("{}{}", user, suffix),
            None => user.to_string(),
        };
        let primary = [ChatMessage::system(system), ChatMessage::user(first_user)];

        match self.complete(&self.primary_model, &primary, sampling).await {
            Err(e) if e.is_model_rejection() => {
                warn!(
                    status = ?e.status(),
                    model = %self.primary_model,
                    "Primary model failed, trying fallback model"
                );
                let retry = [ChatMessage::system(system), ChatMessage::user(user)];
                self.complete(&self.fallback_model, &retry, sampling).await
            }
            other => other,
        }
    }
}
