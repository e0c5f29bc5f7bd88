//! The credential bundle held by the session store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::token::TokenPair;

/// Access and refresh tokens plus their expiries.
///
/// This is also the persisted shape: `{access, refresh, access_exp,
/// refresh_exp}`. Its absence means the client is logged out.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialBundle {
    /// Access token sent as the bearer credential.
    pub access: String,
    /// Refresh token. Kept, never exchanged.
    pub refresh: String,
    /// Access token expiry.
    #[serde(with = "super::expiry")]
    pub access_exp: DateTime<Utc>,
    /// Refresh token expiry.
    #[serde(with = "super::expiry")]
    pub refresh_exp: DateTime<Utc>,
}

impl CredentialBundle {
    /// Value of the `Authorization` header for authenticated calls.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access)
    }

    /// Whether the access token has passed its expiry at `now`.
    pub fn is_access_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.access_exp
    }
}

impl From<TokenPair> for CredentialBundle {
    fn from(pair: TokenPair) -> Self {
        Self {
            access: pair.access_token.token,
            refresh: pair.refresh_token.token,
            access_exp: pair.access_token.exp,
            refresh_exp: pair.refresh_token.exp,
        }
    }
}

impl std::fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .field("access_exp", &self.access_exp)
            .field("refresh_exp", &self.refresh_exp)
            .finish()
    }
}
