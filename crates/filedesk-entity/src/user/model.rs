//! User identity model.

use serde::{Deserialize, Serialize};

use filedesk_core::types::UserId;

/// The identity returned at login.
///
/// Read-only on the client. Fields the client does not model are kept in
/// `extra` so the persisted copy round-trips verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Backend user identifier, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    /// Account email.
    #[serde(default)]
    pub email: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Any other identifying fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    /// Name used in greetings: the first name, else the email.
    pub fn display_name(&self) -> &str {
        if self.first_name.trim().is_empty() {
            &self.email
        } else {
            &self.first_name
        }
    }
}
