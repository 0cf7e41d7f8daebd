//! DemoQA Account API client.
//!
//! # Endpoints
//!
//! | Operation | Endpoint | Auth |
//! |-----------|----------|------|
//! | [`AccountClient::create_user`] | `POST /Account/v1/User` | none |
//! | [`AccountClient::generate_token`] | `POST /Account/v1/GenerateToken` | none |
//! | [`AccountClient::authorized`] | `POST /Account/v1/Authorized` | none |
//! | [`AccountClient::get_user`] | `GET /Account/v1/User/{UUID}` | Bearer |
//! | [`AccountClient::delete_user`] | `DELETE /Account/v1/User/{UUID}` | Bearer |
//!
//! # Authentication
//!
//! Creating a user and generating a token are unauthenticated; fetching
//! and deleting a user require the bearer token issued by
//! [`AccountClient::generate_token`] for that user's credentials.
//!
//! # Example
//!
//! ```no_run
//! use demoqa_account::account::{AccountClient, Session};
//! use demoqa_account::Credentials;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AccountClient::new()?;
//! let credentials = Credentials::new("some_user", "TestPassword123!");
//!
//! let session = Session::establish(&client, &credentials).await?;
//! let user = session.fetch_user(&client).await?;
//! println!("{} holds {} books", user.username, user.books.len());
//!
//! session.teardown(&client).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Service behavior
//!
//! The public deployment is shared and flaky. Observed quirks this module
//! accounts for:
//!
//! - A wrong password on `GenerateToken` is reported in-band: HTTP 200
//!   with `status: "Failed"` ([`GenerateTokenError::AuthorizationFailed`]).
//! - Requests about a missing user have returned any of 401, 404 and 502
//!   depending on service mood ([`UserError::indicates_missing_user`]).
//! - Deletes answer 200 or 204 interchangeably.

pub mod api;

use std::sync::Arc;

use reqwest::StatusCode;
use thiserror::Error;

pub use api::{ApiError, TokenEnvelope};

use crate::types::{ApiMessage, Credentials, Token, TokenStatus, UserAccount};
use crate::HttpClientConfig;

/// Errors from [`AccountClient::create_user`].
#[derive(Debug, Error)]
pub enum CreateUserError {
    /// The username is already taken (HTTP 406).
    #[error("user exists: {0}")]
    UserExists(ApiMessage),
    /// The service rejected the credentials (HTTP 400), typically for a
    /// password policy violation or a missing field.
    #[error("credentials rejected: {0}")]
    InvalidCredentials(ApiMessage),
    /// Any other failure.
    #[error(transparent)]
    Api(ApiError),
}

/// Errors from [`AccountClient::generate_token`].
#[derive(Debug, Error)]
pub enum GenerateTokenError {
    /// The service answered HTTP 200 but refused to authorize the
    /// credentials. `result` carries its wording, e.g.
    /// "User authorization failed.".
    #[error("authorization failed: {result}")]
    AuthorizationFailed { result: String },
    /// Username or password missing from the request (HTTP 400).
    #[error("credentials missing: {0}")]
    MissingCredentials(ApiMessage),
    /// Any other failure.
    #[error(transparent)]
    Api(ApiError),
}

/// Errors from the authenticated per-user operations
/// ([`AccountClient::get_user`], [`AccountClient::delete_user`] and
/// [`AccountClient::authorized`]).
#[derive(Debug, Error)]
pub enum UserError {
    /// HTTP 404.
    #[error("user not found")]
    NotFound,
    /// HTTP 401. Also observed for missing users.
    #[error("unauthorized")]
    Unauthorized,
    /// HTTP 502. The service fronts an upstream that drops requests
    /// under load.
    #[error("bad gateway")]
    BadGateway,
    /// Any other failure.
    #[error(transparent)]
    Api(ApiError),
}

impl UserError {
    /// Whether this error is one of the responses the service has been
    /// observed returning for a user that does not exist (401, 404 or
    /// 502). Callers that only care about absence should accept all
    /// three.
    pub fn indicates_missing_user(&self) -> bool {
        matches!(
            self,
            UserError::NotFound | UserError::Unauthorized | UserError::BadGateway
        )
    }

    fn from_api(err: ApiError) -> Self {
        match err {
            ApiError::Status {
                status: StatusCode::NOT_FOUND,
                ..
            } => UserError::NotFound,
            ApiError::Status {
                status: StatusCode::UNAUTHORIZED,
                ..
            } => UserError::Unauthorized,
            ApiError::Status {
                status: StatusCode::BAD_GATEWAY,
                ..
            } => UserError::BadGateway,
            other => UserError::Api(other),
        }
    }
}

/// DemoQA Account API client.
///
/// Cheap to clone; clones share the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct AccountClient {
    api_client: Arc<api::Client>,
}

impl AccountClient {
    /// Creates a client against the public DemoQA deployment.
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            api_client: Arc::new(api::Client::new()?),
        })
    }

    /// Creates a client against a custom base URL.
    ///
    /// This is primarily useful for testing with mock servers.
    pub fn with_base_url(base_url: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            api_client: Arc::new(api::Client::with_base_url(base_url)?),
        })
    }

    /// Creates a client with custom HTTP configuration.
    pub fn with_config(base_url: &str, config: HttpClientConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            api_client: Arc::new(api::Client::with_config(base_url, config)?),
        })
    }

    /// Creates a new user account.
    ///
    /// On success the service answers 201 with the new account's UUID,
    /// the username echoed back, and an empty book list.
    pub async fn create_user(
        &self,
        credentials: &Credentials,
    ) -> Result<UserAccount, CreateUserError> {
        self.api_client
            .create_user(credentials)
            .await
            .map_err(|err| match err {
                ApiError::Status {
                    status: StatusCode::NOT_ACCEPTABLE,
                    message,
                } => CreateUserError::UserExists(message.unwrap_or_default()),
                ApiError::Status {
                    status: StatusCode::BAD_REQUEST,
                    message,
                } => CreateUserError::InvalidCredentials(message.unwrap_or_default()),
                other => CreateUserError::Api(other),
            })
    }

    /// Generates a bearer token for an existing user.
    ///
    /// Wrong passwords are reported in-band on HTTP 200 and surface as
    /// [`GenerateTokenError::AuthorizationFailed`].
    pub async fn generate_token(
        &self,
        credentials: &Credentials,
    ) -> Result<Token, GenerateTokenError> {
        let envelope = self
            .api_client
            .generate_token(credentials)
            .await
            .map_err(|err| match err {
                ApiError::Status {
                    status: StatusCode::BAD_REQUEST,
                    message,
                } => GenerateTokenError::MissingCredentials(message.unwrap_or_default()),
                other => GenerateTokenError::Api(other),
            })?;

        match envelope.status {
            TokenStatus::Failed => Err(GenerateTokenError::AuthorizationFailed {
                result: envelope.result,
            }),
            TokenStatus::Success => {
                let token = envelope.token.ok_or_else(|| {
                    GenerateTokenError::Api(ApiError::Decode(
                        "Success response without a token".to_string(),
                    ))
                })?;
                Ok(Token {
                    token,
                    expires: envelope.expires.unwrap_or_default(),
                    result: envelope.result,
                })
            }
        }
    }

    /// Checks whether the credentials are currently authorized.
    pub async fn authorized(&self, credentials: &Credentials) -> Result<bool, UserError> {
        self.api_client
            .authorized(credentials)
            .await
            .map_err(UserError::from_api)
    }

    /// Fetches a user by UUID.
    pub async fn get_user(&self, user_id: &str, token: &str) -> Result<UserAccount, UserError> {
        self.api_client
            .get_user(user_id, token)
            .await
            .map_err(UserError::from_api)
    }

    /// Deletes a user by UUID.
    pub async fn delete_user(&self, user_id: &str, token: &str) -> Result<(), UserError> {
        self.api_client
            .delete_user(user_id, token)
            .await
            .map_err(UserError::from_api)
    }
}

/// Errors from [`Session::establish`].
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Create(#[from] CreateUserError),
    #[error(transparent)]
    Token(#[from] GenerateTokenError),
}

/// A created user plus the bearer token authorizing requests about it.
///
/// Test flows need the UUID from the create step and the token from the
/// token step in every later call; `Session` carries both explicitly
/// instead of leaving them as shared mutable state between steps.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub token: Token,
}

impl Session {
    /// Creates a user and generates a token for it.
    pub async fn establish(
        client: &AccountClient,
        credentials: &Credentials,
    ) -> Result<Self, SessionError> {
        let user = client.create_user(credentials).await?;
        let token = client.generate_token(credentials).await?;
        Ok(Self {
            user_id: user.user_id,
            username: user.username,
            token,
        })
    }

    /// Fetches this session's user.
    pub async fn fetch_user(&self, client: &AccountClient) -> Result<UserAccount, UserError> {
        client.get_user(&self.user_id, &self.token.token).await
    }

    /// Deletes this session's user, tolerating the responses the service
    /// gives when the user is already gone or the gateway is failing.
    /// Best-effort by design; use [`AccountClient::delete_user`] directly
    /// for a strict delete.
    pub async fn teardown(self, client: &AccountClient) -> Result<(), UserError> {
        match client.delete_user(&self.user_id, &self.token.token).await {
            Ok(()) => Ok(()),
            Err(err) if err.indicates_missing_user() => Ok(()),
            Err(err) => Err(err),
        }
    }
}
