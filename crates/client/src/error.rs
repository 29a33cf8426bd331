use thiserror::Error;

/// Errors surfaced by the REST and chat-completion clients.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("GROQ API key not configured. Please set DW__AI__API_KEY in your environment or .env file.")]
    MissingApiKey,

    /// Non-2xx backend answer. The message is the server's `error` or
    /// `detail` field when present.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Unauthorized - please login again")]
    SessionExpired,

    #[error("{0}")]
    Login(String),

    #[error("{message}")]
    Completion { status: u16, message: String },

    #[error("No response content from AI")]
    EmptyCompletion,

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Credential storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// HTTP status carried by the error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } | ClientError::Completion { status, .. } => {
                Some(*status)
            }
            ClientError::SessionExpired => Some(401),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// 400 or 404 from the chat-completion endpoint: the model was rejected.
    pub fn is_model_rejection(&self) -> bool {
        matches!(
            self,
            ClientError::Completion {
                status: 400 | 404,
                ..
            }
        )
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<validator::ValidationError> for ClientError {
    fn from(error: validator::ValidationError) -> Self {
        ClientError::Validation(
            error
                .message
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string()),
        )
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    e.message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
            })
            .collect();

        let message = if messages.len() == 1 {
            messages[0].clone()
        } else {
            format!("{} validation errors", messages.len())
        };

        ClientError::Validation(message)
    }
}
