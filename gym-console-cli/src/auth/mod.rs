//! Authenticated-identity container.
//!
//! One [`AuthSession`] is built per process and handed to every command. It
//! owns the identity cell: a `watch` channel whose current value is the
//! logged-in [`User`] (or `None`), so callers can either take a snapshot with
//! [`AuthSession::current_user`] or react to changes via
//! [`AuthSession::subscribe`]. Tokens and identity are mirrored into
//! [`Storage`](crate::storage::Storage) so the next process starts logged in.

use thiserror::Error;
use tokio::sync::watch;

use crate::api::{ApiClient, ApiError};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, RegisterResponse, User};

const LOGIN_PATH: &str = "users/login/";
const REGISTER_PATH: &str = "users/register/";

/// Server fields whose messages are shown inline on auth screens
const AUTH_FIELDS: [&str; 4] = ["password", "username", "email", "non_field_errors"];

#[derive(Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Account created but login failed. Please try logging in manually.")]
    LoginAfterRegister(#[source] ApiError),

    #[error("Passwords do not match!")]
    PasswordMismatch,

    #[error("Session storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl AuthError {
    /// Message for the login/register screen
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AuthError::Api(e) => e.user_message(&AUTH_FIELDS, fallback),
            other => other.to_string(),
        }
    }
}

pub struct AuthSession {
    api: ApiClient,
    identity: watch::Sender<Option<User>>,
}

impl AuthSession {
    /// Build the container, restoring any identity left in storage.
    /// No network call is made and token expiry is not checked.
    pub fn restore(api: ApiClient) -> Self {
        let user = match api.storage().load_user() {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Could not restore session: {:#}", e);
                None
            }
        };

        if let Some(user) = &user {
            tracing::debug!("Restored session for {}", user.username);
        }

        let (identity, _) = watch::channel(user);
        Self { api, identity }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Snapshot of the current identity
    pub fn current_user(&self) -> Option<User> {
        self.identity.borrow().clone()
    }

    /// Stream of identity changes
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.identity.subscribe()
    }

    /// Whether an access token is stored
    pub fn is_authenticated(&self) -> bool {
        matches!(self.api.storage().access_token(), Ok(Some(_)))
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        tracing::debug!("Logging in as {}", username);

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response: AuthResponse = self.api.post_auth(LOGIN_PATH, &request).await?;
        let user = self.establish(response)?;

        tracing::info!("Successfully logged in as {}", user.username);
        Ok(user)
    }

    /// Create an account. A token-bearing response logs in directly; a
    /// message-only response is followed by a login with the same credentials.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, AuthError> {
        if request.password != request.password_confirm {
            return Err(AuthError::PasswordMismatch);
        }

        tracing::debug!("Registering {}", request.username);

        let response: RegisterResponse = self.api.post_auth(REGISTER_PATH, request).await?;

        match response {
            RegisterResponse::Authenticated(auth) => {
                let user = self.establish(auth)?;
                tracing::info!("Registered and logged in as {}", user.username);
                Ok(user)
            }
            RegisterResponse::Created { message, .. } => {
                tracing::info!(
                    "Registered {}: {}",
                    request.username,
                    message.as_deref().unwrap_or("account created")
                );

                match self.login(&request.username, &request.password).await {
                    Ok(user) => Ok(user),
                    Err(AuthError::Api(e)) => Err(AuthError::LoginAfterRegister(e)),
                    Err(other) => Err(other),
                }
            }
        }
    }

    /// Clear stored tokens and identity, then publish the anonymous state
    pub fn logout(&self) -> Result<(), AuthError> {
        self.api.storage().clear_session()?;
        self.identity.send_replace(None);

        tracing::info!("Logged out");
        Ok(())
    }

    fn establish(&self, response: AuthResponse) -> Result<User, AuthError> {
        self.api
            .storage()
            .save_session(&response.access, &response.refresh, &response.user)?;

        self.identity.send_replace(Some(response.user.clone()));
        Ok(response.user)
    }
}
