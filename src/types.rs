//! Request and response types shared across the Account API surface.
//!
//! # Field naming
//!
//! The Account API is inconsistent about casing: the create-user response
//! carries `userID` while the get-user response carries `userId` for the
//! same value. [`UserAccount`] accepts both. Request bodies use
//! `userName`/`password`.
//!
//! # Password policy
//!
//! The service enforces a password policy server-side and reports
//! violations as HTTP 400 with a message string. [`Credentials::validate`]
//! implements the same rule set locally so callers can pre-flight
//! credentials, but the server remains authoritative:
//!
//! | Rule | Constant |
//! |------|----------|
//! | Minimum length | [`MIN_PASSWORD_LEN`] |
//! | At least one uppercase letter | - |
//! | At least one lowercase letter | - |
//! | At least one digit | - |
//! | At least one non-alphanumeric character | - |

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum password length accepted by the service.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Sign-up / sign-in credentials.
///
/// Serializes with the field names the API expects (`userName`,
/// `password`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
}

impl Credentials {
    /// Creates credentials without validating them.
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            password: password.into(),
        }
    }

    /// Checks the credentials against the service's documented password
    /// policy. Returns the first violated rule.
    pub fn validate(&self) -> Result<(), CredentialsError> {
        if self.user_name.is_empty() {
            return Err(CredentialsError::EmptyUserName);
        }
        if self.password.is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CredentialsError::PasswordTooShort);
        }
        if !self.password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(CredentialsError::MissingUppercase);
        }
        if !self.password.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(CredentialsError::MissingLowercase);
        }
        if !self.password.chars().any(|c| c.is_ascii_digit()) {
            return Err(CredentialsError::MissingDigit);
        }
        if self.password.chars().all(|c| c.is_alphanumeric()) {
            return Err(CredentialsError::MissingNonAlphanumeric);
        }
        Ok(())
    }
}

/// A violated credential rule, phrased like the service's own messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CredentialsError {
    #[error("UserName and Password required.")]
    EmptyUserName,
    #[error("Password field is required")]
    EmptyPassword,
    #[error("Passwords must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
    #[error("Passwords must have at least one uppercase ('A'-'Z')")]
    MissingUppercase,
    #[error("Passwords must have at least one lowercase ('a'-'z')")]
    MissingLowercase,
    #[error("Passwords must have at least one digit ('0'-'9')")]
    MissingDigit,
    #[error("Passwords must have at least one non alphanumeric character")]
    MissingNonAlphanumeric,
}

/// A user account as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    /// Account UUID. The create response spells this `userID`, the get
    /// response spells it `userId`.
    #[serde(alias = "userID")]
    pub user_id: String,
    pub username: String,
    /// Books currently assigned to the account. Empty for new users.
    pub books: Vec<Book>,
}

/// A book from the companion book-store catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub sub_title: String,
    pub author: String,
    // The one snake_case field in an otherwise camelCase payload.
    #[serde(rename = "publish_date")]
    pub publish_date: String,
    pub publisher: String,
    pub pages: u32,
    pub description: String,
    pub website: String,
}

/// Outcome reported inside a token response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TokenStatus {
    Success,
    Failed,
}

impl fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenStatus::Success => write!(f, "Success"),
            TokenStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// A bearer token successfully issued for a user.
///
/// Only produced for `status: Success` responses; the in-band failure
/// case surfaces as [`crate::GenerateTokenError::AuthorizationFailed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The bearer token value.
    pub token: String,
    /// Expiry timestamp as reported by the service (ISO-8601 string).
    pub expires: String,
    /// Human-readable outcome, e.g. "User authorized successfully.".
    pub result: String,
}

/// Error payload the Account API attaches to non-success responses.
///
/// Shape: `{"code": "1204", "message": "User exists!"}`. The `code` is a
/// service-internal string and is sometimes absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

impl fmt::Display for ApiMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
