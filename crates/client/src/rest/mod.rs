//! REST clients for the DisasterWatch backend.
//!
//! [`AdminClient`] carries the operator session and replays its bearer token;
//! [`PublicClient`] is anonymous. Both share the transport in [`RestClient`].

pub mod admin;
pub mod paths;
pub mod public;

pub use admin::AdminClient;
pub use public::PublicClient;

use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::BackendConfig;
use crate::error::ClientError;
use crate::session::Session;

/// Shared HTTP transport: URL building, headers and failure mapping.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
    session: Option<Session>,
}

impl RestClient {
    /// Anonymous transport.
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session: None,
        })
    }

    /// Transport that authenticates with, and expires, `session`.
    pub fn with_session(config: &BackendConfig, session: Session) -> Result<Self, ClientError> {
        let mut client = Self::new(config)?;
        client.session = Some(session);
        Ok(client)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = self.url(path);
        debug!(method = %method, url = %url, "Backend request");

        let mut builder = self
            .http
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = self.session.as_ref().map(Session::token).transpose()?.flatten() {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Sends the request and enforces the failure policy.
    async fn execute(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            if let Some(session) = &self.session {
                session.expire()?;
                return Err(ClientError::SessionExpired);
            }
        }

        if !status.is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = self.execute(builder).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Unexpected backend response body");
            ClientError::Decode(e.to_string())
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send_json(self.request(Method::GET, path)?).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send_json(self.request(Method::POST, path)?).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.request(Method::POST, path)?.json(body))
            .await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.request(Method::PUT, path)?.json(body))
            .await
    }

    /// DELETE; the response body, if any, is discarded.
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.execute(self.request(Method::DELETE, path)?).await?;
        Ok(())
    }

    /// POST without the session's token or 401 handling, for login.
    pub(crate) async fn post_unauthenticated<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ClientError> {
        let url = self.url(path);
        debug!(url = %url, "Backend request without credentials");
        Ok(self
            .http
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?)
    }
}

/// Builds the error for a non-2xx response: body `error`, then `detail`,
/// then `HTTP <status>`.
pub(crate) async fn error_from_response(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = message_field(&body, &["error", "detail"])
        .unwrap_or_else(|| format!("HTTP {}", status));

    debug!(status, message = %message, "Backend returned an error");
    ClientError::Http { status, message }
}

/// First non-empty string among `keys` in a JSON object body.
pub(crate) fn message_field(body: &str, keys: &[&str]) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find_map(|v| match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::String(_) | Value::Null => None,
            other => Some(other.to_string()),
        })
}
