//! Thin client for the user-directory API.
//!
//! The directory exposes a single read endpoint, `GET /users/{id}`,
//! returning a rich profile document. This module wraps it with typed
//! models and an error taxonomy matching the statuses the directory
//! documents (403, 404, 502), each carrying the decoded
//! `{error, details, status, timestamp}` body when one was sent.
//!
//! # Example
//!
//! ```no_run
//! use demoqa_account::directory::DirectoryClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DirectoryClient::new()?;
//! match client.get_user(1).await? {
//!     Some(profile) => println!("{} <{}>", profile.name, profile.email),
//!     None => println!("no content"),
//! }
//! # Ok(())
//! # }
//! ```

use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::{build_http_client, HttpClientConfig};

const DIRECTORY_API_URL: &str = "https://api.example.com";

/// Errors from [`DirectoryClient::get_user`].
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// HTTP 403.
    #[error("forbidden")]
    Forbidden(Option<ErrorBody>),
    /// HTTP 404.
    #[error("user not found")]
    NotFound(Option<ErrorBody>),
    /// HTTP 502.
    #[error("bad gateway")]
    BadGateway(Option<ErrorBody>),
    /// Any other non-success status.
    #[error("API error ({status})")]
    Api {
        status: StatusCode,
        body: Option<ErrorBody>,
    },
    /// Request failed before a status was available (DNS, connect,
    /// timeout).
    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl DirectoryError {
    /// The HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            DirectoryError::Forbidden(_) => Some(StatusCode::FORBIDDEN),
            DirectoryError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            DirectoryError::BadGateway(_) => Some(StatusCode::BAD_GATEWAY),
            DirectoryError::Api { status, .. } => Some(*status),
            DirectoryError::Transport(err) => err.status(),
            DirectoryError::Decode(_) => None,
        }
    }

    /// The decoded error body, when the response carried one.
    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            DirectoryError::Forbidden(body)
            | DirectoryError::NotFound(body)
            | DirectoryError::BadGateway(body)
            | DirectoryError::Api { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

/// Error document the directory attaches to non-success responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    /// Short error name, e.g. "Not Found".
    pub error: String,
    /// Human-readable explanation.
    pub details: String,
    /// Echo of the HTTP status.
    pub status: u16,
    /// ISO-8601 timestamp of the failure.
    pub timestamp: String,
}

/// A user profile document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub username: String,
    pub phone: String,
    pub address: Address,
    pub company: Company,
    /// Date of birth, `YYYY-MM-DD`.
    pub dob: String,
    pub profile_picture_url: String,
    pub is_active: bool,
    /// ISO-8601 timestamps, kept as strings.
    pub created_at: String,
    pub updated_at: String,
    pub preferences: Preferences,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Company {
    pub name: String,
    pub industry: String,
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Preferences {
    pub language: String,
    pub timezone: String,
    pub notifications_enabled: bool,
}

/// User-directory API client.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http_client: HttpClient,
    base_url: String,
}

impl DirectoryClient {
    /// Creates a client against the directory's public base URL.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_base_url(DIRECTORY_API_URL)
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

    /// `GET /users/{user_id}`
    ///
    /// Returns `Ok(None)` for a 204 No Content response.
    pub async fn get_user(&self, user_id: u64) -> Result<Option<UserProfile>, DirectoryError> {
        let response = self
            .http_client
            .get(format!("{}/users/{}", self.base_url, user_id))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        if status.is_success() {
            let text = response.text().await?;
            return serde_json::from_str(&text)
                .map(Some)
                .map_err(|err| DirectoryError::Decode(format!("{err} - {text}")));
        }

        let body = match response.text().await {
            Ok(text) => serde_json::from_str::<ErrorBody>(&text).ok(),
            Err(_) => None,
        };

        Err(match status {
            StatusCode::FORBIDDEN => DirectoryError::Forbidden(body),
            StatusCode::NOT_FOUND => DirectoryError::NotFound(body),
            StatusCode::BAD_GATEWAY => DirectoryError::BadGateway(body),
            _ => DirectoryError::Api { status, body },
        })
    }
}
