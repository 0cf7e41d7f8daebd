//! Low-level HTTP client for the DemoQA Account API.
//!
//! This layer maps 1:1 onto the HTTP endpoints and reports non-success
//! responses verbatim as [`ApiError::Status`]. Classification into
//! per-operation errors happens in the parent module.

use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::types::{ApiMessage, Credentials, TokenStatus, UserAccount};
use crate::{build_http_client, HttpClientConfig};

const DEMOQA_API_URL: &str = "https://demoqa.com";

/// Errors from the raw API layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success HTTP status, with the decoded error payload when the
    /// body carried one.
    #[error("API error ({status}): {}", message.as_ref().map(|m| m.message.as_str()).unwrap_or("<no error payload>"))]
    Status {
        status: StatusCode,
        message: Option<ApiMessage>,
    },
    /// Request failed before a status was available (DNS, connect,
    /// timeout).
    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status(),
            ApiError::Decode(_) => None,
        }
    }
}

/// Raw token response. `token` and `expires` are null when the service
/// reports an in-band authorization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenEnvelope {
    pub token: Option<String>,
    pub expires: Option<String>,
    pub status: TokenStatus,
    pub result: String,
}

/// DemoQA Account API client.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: HttpClient,
    base_url: String,
}

impl Client {
    /// Creates a client against the public DemoQA deployment.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_base_url(DEMOQA_API_URL)
    }

    /// Creates a client against a custom base URL.
    ///
    /// This is primarily useful for testing with mock servers.
    pub fn with_base_url(base_url: &str) -> Result<Self, reqwest::Error> {
        Self::with_config(base_url, HttpClientConfig::default())
    }

    /// Creates a client with custom HTTP configuration.
    pub fn with_config(base_url: &str, config: HttpClientConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http_client: build_http_client(&config)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `POST /Account/v1/User`
    pub async fn create_user(&self, credentials: &Credentials) -> Result<UserAccount, ApiError> {
        let response = self
            .http_client
            .post(format!("{}/Account/v1/User", self.base_url))
            .json(credentials)
            .send()
            .await?;
        decode(response).await
    }

    /// `POST /Account/v1/GenerateToken`
    pub async fn generate_token(
        &self,
        credentials: &Credentials,
    ) -> Result<TokenEnvelope, ApiError> {
        let response = self
            .http_client
            .post(format!("{}/Account/v1/GenerateToken", self.base_url))
            .json(credentials)
            .send()
            .await?;
        decode(response).await
    }

    /// `POST /Account/v1/Authorized`
    ///
    /// Returns the bare boolean body the endpoint answers with.
    pub async fn authorized(&self, credentials: &Credentials) -> Result<bool, ApiError> {
        let response = self
            .http_client
            .post(format!("{}/Account/v1/Authorized", self.base_url))
            .json(credentials)
            .send()
            .await?;
        decode(response).await
    }

    /// `GET /Account/v1/User/{user_id}` with Bearer authentication.
    pub async fn get_user(&self, user_id: &str, token: &str) -> Result<UserAccount, ApiError> {
        let response = self
            .http_client
            .get(format!("{}/Account/v1/User/{}", self.base_url, user_id))
            .bearer_auth(token)
            .send()
            .await?;
        decode(response).await
    }

    /// `DELETE /Account/v1/User/{user_id}` with Bearer authentication.
    ///
    /// The service answers 200 or 204 on success; both are accepted.
    pub async fn delete_user(&self, user_id: &str, token: &str) -> Result<(), ApiError> {
        let response = self
            .http_client
            .delete(format!("{}/Account/v1/User/{}", self.base_url, user_id))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(status_error(status, response).await)
    }
}

/// Decodes a success body, or surfaces the status and error payload.
async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(status_error(status, response).await);
    }

    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|err| ApiError::Decode(format!("{err} - {text}")))
}

/// Builds a [`ApiError::Status`], keeping the `{code, message}` payload
/// when the body parses as one.
async fn status_error(status: StatusCode, response: Response) -> ApiError {
    let message = match response.text().await {
        Ok(body) => serde_json::from_str::<ApiMessage>(&body).ok(),
        Err(_) => None,
    };
    ApiError::Status { status, message }
}
