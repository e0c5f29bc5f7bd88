//! Wire types for the login exchange.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::User;

/// Body of `POST login/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Plain-text password, sent over the API connection only.
    pub password: String,
}

/// One issued token with its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// The raw token string.
    pub token: String,
    /// When the token stops being accepted.
    #[serde(with = "super::expiry")]
    pub exp: DateTime<Utc>,
}

/// The access/refresh pair returned on login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// The access token.
    pub access_token: IssuedToken,
    /// The refresh token.
    pub refresh_token: IssuedToken,
}

/// Body of a successful `POST login/` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The logged-in user.
    pub user: User,
    /// Issued tokens.
    pub token: TokenPair,
}
