use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub mock: MockConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Root of the REST API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_ai_api_url")]
    pub api_url: String,

    /// Chat-completion API key. Absent keys are reported per call.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_primary_model")]
    pub primary_model: String,

    /// Used when the primary model answers 400 or 404, and for short
    /// auxiliary prompts.
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,

    #[serde(default = "default_ai_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_admin_limits")]
    pub admin_limits: PromptLimits,

    #[serde(default = "default_public_limits")]
    pub public_limits: PromptLimits,
}

/// How many items of each collection are rendered into a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PromptLimits {
    pub shelters: usize,
    pub earthquakes: usize,
    #[serde(default = "default_alert_limit")]
    pub alerts: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// File holding the persisted token and user. In-memory when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MockConfig {
    /// Artificial delay applied to every mock backend call.
    #[serde(default = "default_mock_latency")]
    pub latency_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}
fn default_request_timeout() -> u64 {
    30
}
fn default_ai_api_url() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}
fn default_primary_model() -> String {
    "meta-llama/llama-4-scout-17b-16e-instruct".to_string()
}
fn default_fallback_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}
fn default_ai_timeout() -> u64 {
    60
}
fn default_alert_limit() -> usize {
    5
}
fn default_admin_limits() -> PromptLimits {
    PromptLimits::ADMIN
}
fn default_public_limits() -> PromptLimits {
    PromptLimits::PUBLIC
}
fn default_mock_latency() -> u64 {
    300
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

impl PromptLimits {
    pub const ADMIN: PromptLimits = PromptLimits {
        shelters: 10,
        earthquakes: 5,
        alerts: 5,
    };

    pub const PUBLIC: PromptLimits = PromptLimits {
        shelters: 5,
        earthquakes: 5,
        alerts: 5,
    };
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_url: default_ai_api_url(),
            api_key: None,
            primary_model: default_primary_model(),
            fallback_model: default_fallback_model(),
            request_timeout_secs: default_ai_timeout(),
            admin_limits: PromptLimits::ADMIN,
            public_limits: PromptLimits::PUBLIC,
        }
    }
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The API key, ignoring blank values left by empty env vars.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_mock_latency(),
        }
    }
}

impl MockConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - shipped defaults (optional)
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with DW__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("DW").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Builds entirely from embedded defaults and overrides, without touching
    /// the file system or the environment.
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [backend]
            base_url = "http://localhost:8000/api"
            request_timeout_secs = 30

            [ai]
            api_url = "https://api.groq.com/openai/v1/chat/completions"
            primary_model = "meta-llama/llama-4-scout-17b-16e-instruct"
            fallback_model = "llama-3.3-70b-versatile"
            request_timeout_secs = 60

            [ai.admin_limits]
            shelters = 10
            earthquakes = 5
            alerts = 5

            [ai.public_limits]
            shelters = 5
            earthquakes = 5

            [mock]
            latency_ms = 0

            [logging]
            level = "info"
            format = "json"
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        // Skip validation in tests to allow partial configs
        Ok(cfg)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "DW__BACKEND__BASE_URL must not be empty".to_string(),
            ));
        }

        for (name, value) in [
            ("backend.base_url", &self.backend.base_url),
            ("ai.api_url", &self.ai.api_url),
        ] {
            url::Url::parse(value).map_err(|e| {
                ConfigValidationError::InvalidValue(format!("{} is not a valid URL: {}", name, e))
            })?;
        }

        if self.backend.request_timeout_secs == 0 || self.ai.request_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Request timeouts cannot be 0".to_string(),
            ));
        }

        for (name, limits) in [
            ("ai.admin_limits", self.ai.admin_limits),
            ("ai.public_limits", self.ai.public_limits),
        ] {
            if limits.shelters == 0 || limits.earthquakes == 0 || limits.alerts == 0 {
                return Err(ConfigValidationError::InvalidValue(format!(
                    "{} entries must be at least 1",
                    name
                )));
            }
        }

        Ok(())
    }
}
