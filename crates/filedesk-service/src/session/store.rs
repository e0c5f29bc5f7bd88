//! Session store: the one owner of the credential bundle and user identity.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use filedesk_client::DriveApi;
use filedesk_core::error::AppError;
use filedesk_core::result::AppResult;
use filedesk_core::traits::StateStore;
use filedesk_entity::session::{CredentialBundle, LoginRequest};
use filedesk_entity::user::{SignupForm, User};

/// Durable key holding the serialized credential bundle.
pub const TOKENS_KEY: &str = "auth_tokens";
/// Durable key holding the serialized user identity.
pub const USER_KEY: &str = "user";

/// A logged-in user and their credentials.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    /// Tokens sent with every authenticated call.
    pub credentials: CredentialBundle,
    /// Identity returned at login.
    pub user: User,
}

/// Holds the current session and keeps the durable copy in step with it.
pub struct SessionStore {
    /// Remote service used for login and signup.
    api: Arc<dyn DriveApi>,
    /// Durable key/value store.
    state: Arc<dyn StateStore>,
    /// In-memory copy of the active session.
    current: RwLock<Option<ActiveSession>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish()
    }
}

impl SessionStore {
    /// Creates a store with no active session.
    pub fn new(api: Arc<dyn DriveApi>, state: Arc<dyn StateStore>) -> Self {
        Self {
            api,
            state,
            current: RwLock::new(None),
        }
    }

    /// Load a previously persisted session, verbatim.
    ///
    /// Both keys must be present and readable; otherwise the store stays
    /// logged out. Expired tokens are loaded anyway and only logged, the
    /// backend decides whether they are still accepted.
    pub async fn restore(&self) -> AppResult<Option<User>> {
        let tokens = self.state.get(TOKENS_KEY).await?;
        let user = self.state.get(USER_KEY).await?;

        let (Some(tokens), Some(user)) = (tokens, user) else {
            debug!("No persisted session");
            return Ok(None);
        };

        let credentials: CredentialBundle = match serde_json::from_str(&tokens) {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Persisted credentials are unreadable, ignoring them");
                return Ok(None);
            }
        };
        let user: User = match serde_json::from_str(&user) {
            Ok(u) => u,
            Err(e) => {
                warn!(error = %e, "Persisted user is unreadable, ignoring it");
                return Ok(None);
            }
        };

        if credentials.is_access_expired(Utc::now()) {
            warn!(
                expired_at = %credentials.access_exp,
                "Restored access token has expired; requests may be rejected"
            );
        }

        info!(email = %user.email, "Session restored");
        *self.current.write().await = Some(ActiveSession {
            credentials,
            user: user.clone(),
        });
        Ok(Some(user))
    }

    /// Exchange email and password for a session and persist it.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let response = match self.api.login(&request).await {
            Ok(r) => r,
            Err(e) => {
                warn!(email = %request.email, error = %e, "Login failed");
                return Err(e);
            }
        };

        let session = ActiveSession {
            credentials: CredentialBundle::from(response.token),
            user: response.user,
        };
        self.persist(&session).await?;

        info!(email = %session.user.email, "Logged in");
        let user = session.user.clone();
        *self.current.write().await = Some(session);
        Ok(user)
    }

    /// Validate the form locally, register, then log in with the new account.
    pub async fn signup(&self, form: &SignupForm) -> AppResult<User> {
        if let Some(message) = form.first_error() {
            return Err(AppError::validation(message));
        }

        let request = form.to_request();
        self.api.signup(&request).await?;
        info!(email = %request.email, "Account created");

        self.login(&request.email, &request.password).await
    }

    /// Forget the session in memory and on disk.
    pub async fn logout(&self) -> AppResult<()> {
        let previous = self.current.write().await.take();
        self.state.remove(TOKENS_KEY).await?;
        self.state.remove(USER_KEY).await?;
        if let Some(session) = previous {
            info!(email = %session.user.email, "Logged out");
        }
        Ok(())
    }

    /// The live credential bundle, or an authentication error.
    pub async fn credentials(&self) -> AppResult<CredentialBundle> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|s| s.credentials.clone())
            .ok_or_else(|| AppError::authentication("You are not logged in"))
    }

    /// The logged-in user, if any.
    pub async fn current_user(&self) -> Option<User> {
        self.current.read().await.as_ref().map(|s| s.user.clone())
    }

    /// Whether a credential bundle is present.
    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    async fn persist(&self, session: &ActiveSession) -> AppResult<()> {
        let tokens = serde_json::to_string(&session.credentials)?;
        let user = serde_json::to_string(&session.user)?;
        self.state.set(TOKENS_KEY, &tokens).await?;
        self.state.set(USER_KEY, &user).await?;
        Ok(())
    }
}
