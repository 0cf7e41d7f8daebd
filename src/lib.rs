//! Typed async clients for the DemoQA Account API and the companion
//! user-directory API, plus the request/response types they share.
//!
//! The Account API is a public demo service for exercising user account
//! CRUD flows: create a user, generate a bearer token, fetch the user,
//! delete it. This crate wraps those endpoints in a typed client so that
//! test suites assert against enums and structs instead of raw status
//! codes and untyped JSON.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`account`] | DemoQA Account API client (`/Account/v1/...`) |
//! | [`directory`] | Thin client for the user-directory API (`/users/{id}`) |
//! | [`types`] | Shared request/response types and credential validation |
//!
//! # Example
//!
//! ```no_run
//! use demoqa_account::{AccountClient, Credentials};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AccountClient::new()?;
//! let credentials = Credentials::new("some_user", "TestPassword123!");
//!
//! let user = client.create_user(&credentials).await?;
//! let token = client.generate_token(&credentials).await?;
//!
//! let fetched = client.get_user(&user.user_id, &token.token).await?;
//! assert_eq!(fetched.username, credentials.user_name);
//!
//! client.delete_user(&user.user_id, &token.token).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Service quirks
//!
//! The remote service is a shared demo deployment and answers
//! inconsistently under load: requests about a missing user have been
//! observed to return 401, 404 or 502, and bad passwords are reported
//! in-band on an HTTP 200. The error enums in [`account`] classify each
//! response distinctly; [`account::UserError::indicates_missing_user`]
//! captures the observed equivalence where a caller wants to tolerate it.

pub mod account;
pub mod directory;
pub mod types;

use std::net::IpAddr;
use std::time::Duration;

pub use account::{
    AccountClient, CreateUserError, GenerateTokenError, Session, SessionError, UserError,
};
pub use directory::{DirectoryClient, DirectoryError, ErrorBody, UserProfile};
pub use types::{ApiMessage, Book, Credentials, CredentialsError, Token, TokenStatus, UserAccount};

/// Default per-request timeout applied to every client in this crate.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the underlying HTTP client.
///
/// All fields are optional; unset fields fall back to the defaults noted
/// below. Applies to both [`AccountClient`] and [`DirectoryClient`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use demoqa_account::HttpClientConfig;
///
/// let config = HttpClientConfig::new().timeout(Duration::from_secs(5));
/// assert_eq!(config.timeout, Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Per-request timeout. Defaults to [`DEFAULT_TIMEOUT`].
    pub timeout: Option<Duration>,
    /// Local address to bind outgoing connections to.
    pub local_address: Option<IpAddr>,
    /// Network interface to bind to (Linux, Android and Fuchsia only;
    /// ignored elsewhere).
    pub interface: Option<String>,
}

impl HttpClientConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Binds outgoing connections to a local address.
    pub fn local_address(mut self, addr: IpAddr) -> Self {
        self.local_address = Some(addr);
        self
    }

    /// Binds outgoing connections to a named network interface.
    pub fn interface(mut self, name: impl Into<String>) -> Self {
        self.interface = Some(name.into());
        self
    }
}

/// Builds a `reqwest::Client` from an [`HttpClientConfig`].
pub(crate) fn build_http_client(config: &HttpClientConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("demoqa-account/", env!("CARGO_PKG_VERSION")))
        .timeout(config.timeout.unwrap_or(DEFAULT_TIMEOUT));

    if let Some(addr) = config.local_address {
        builder = builder.local_address(addr);
    }

    #[cfg(any(target_os = "android", target_os = "fuchsia", target_os = "linux"))]
    if let Some(ref iface) = config.interface {
        builder = builder.interface(iface);
    }

    builder.build()
}
