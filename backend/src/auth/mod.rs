//! # Auth module
//!
//! Wraps the external identity service: password sign-in, OAuth popup,
//! sign-up, password reset and sign-out. On success an opaque [`Session`]
//! becomes available and is passed explicitly to everything that needs the
//! owner identifier — there is no ambient auth singleton.

pub mod local;

use async_trait::async_trait;
use log::{error, info};
use shared::{Session, UserProfile, DEFAULT_PROFILE_IMAGE};
use std::sync::Arc;
use thiserror::Error;

use crate::store::{Connection, UserStorage};

pub use local::LocalIdentity;

/// Failure taxonomy of the identity boundary. Surfaced to the user as
/// blocking alerts; none of these are retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredential,
    #[error("an account with this email already exists")]
    EmailInUse,
    #[error("the sign-in popup was closed before completing")]
    PopupClosed,
    #[error("identity provider error: {0}")]
    Provider(String),
    #[error("please enter your email first to reset your password")]
    EmailRequired,
}

/// OAuth providers offered on the login and sign-up views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
}

/// Boundary to the external identity service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str)
        -> Result<Session, AuthError>;

    /// Opens the provider's popup flow. Fails with [`AuthError::PopupClosed`]
    /// when the user dismisses it.
    async fn sign_in_with_popup(&self, provider: OAuthProvider) -> Result<Session, AuthError>;

    /// Creates the account and returns the fresh session.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError>;

    /// Clears the provider-side session.
    async fn sign_out(&self);
}

/// Front door of the app: couples the identity provider with the `users`
/// collection so sign-up also creates the profile document.
pub struct AuthGate<P: IdentityProvider, C: Connection> {
    provider: P,
    user_repository: C::UserRepository,
}

impl<P: IdentityProvider, C: Connection> AuthGate<P, C> {
    pub fn new(provider: P, connection: Arc<C>) -> Self {
        let user_repository = connection.create_user_repository();
        Self {
            provider,
            user_repository,
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self.provider.sign_in_with_password(email, password).await?;
        info!("user {} signed in", session.user_id);
        Ok(session)
    }

    /// OAuth sign-in. Also used as sign-up: when no profile document exists
    /// yet, one is created from the provider's display name.
    pub async fn sign_in_with_popup(
        &self,
        provider: OAuthProvider,
    ) -> Result<Session, AuthError> {
        let session = self.provider.sign_in_with_popup(provider).await?;
        let existing = self
            .user_repository
            .get_user(&session.user_id)
            .map_err(|e| AuthError::Provider(e.to_string()))?;
        if existing.is_none() {
            let full_name = session.display_name.clone().unwrap_or_default();
            self.create_profile(&session, full_name)?;
        }
        info!("user {} signed in via popup", session.user_id);
        Ok(session)
    }

    /// Creates the account, then the `users` document keyed by the new
    /// identifier.
    pub async fn sign_up(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let session = self.provider.sign_up(email, password).await?;
        self.create_profile(&session, full_name.to_string())?;
        info!("user {} signed up", session.user_id);
        Ok(session)
    }

    /// Asks the provider to email a reset link. The caller must supply an
    /// email first.
    pub async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        if email.trim().is_empty() {
            return Err(AuthError::EmailRequired);
        }
        self.provider.send_password_reset(email).await
    }

    /// Clears the session. The caller is responsible for routing back to the
    /// entry page afterwards.
    pub async fn sign_out(&self) {
        self.provider.sign_out().await;
        info!("signed out");
    }

    fn create_profile(&self, session: &Session, full_name: String) -> Result<(), AuthError> {
        let profile = UserProfile {
            id: session.user_id.clone(),
            email: session.email.clone(),
            full_name,
            bio: String::new(),
            profile_image: DEFAULT_PROFILE_IMAGE.to_string(),
        };
        self.user_repository.store_user(&profile).map_err(|e| {
            error!("failed to create user document for {}: {}", session.user_id, e);
            AuthError::Provider(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryConnection;

    fn gate_with_popup() -> AuthGate<LocalIdentity, MemoryConnection> {
        let connection = Arc::new(MemoryConnection::new());
        let provider = LocalIdentity::new().with_popup_account("oauth@example.com", "Grace Hopper");
        AuthGate::new(provider, connection)
    }

    fn gate() -> (AuthGate<LocalIdentity, MemoryConnection>, Arc<MemoryConnection>) {
        let connection = Arc::new(MemoryConnection::new());
        let gate = AuthGate::new(LocalIdentity::new(), Arc::clone(&connection));
        (gate, connection)
    }

    #[tokio::test]
    async fn test_sign_up_creates_session_and_user_document() {
        let (gate, connection) = gate();
        let session = gate
            .sign_up("Ada Lovelace", "ada@example.com", "hunter2")
            .await
            .unwrap();
        assert_eq!(session.email, "ada@example.com");

        let users = connection.create_user_repository();
        let profile = users.get_user(&session.user_id).unwrap().unwrap();
        assert_eq!(profile.full_name, "Ada Lovelace");
        assert_eq!(profile.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_sign_up_rejects_duplicate_email() {
        let (gate, _connection) = gate();
        gate.sign_up("Ada", "ada@example.com", "hunter2")
            .await
            .unwrap();
        let err = gate
            .sign_up("Imposter", "ada@example.com", "other")
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::EmailInUse);
    }

    #[tokio::test]
    async fn test_sign_in_with_wrong_password_fails() {
        let (gate, _connection) = gate();
        gate.sign_up("Ada", "ada@example.com", "hunter2")
            .await
            .unwrap();

        let err = gate.sign_in("ada@example.com", "wrong").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredential);

        let err = gate.sign_in("nobody@example.com", "x").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredential);

        let session = gate.sign_in("ada@example.com", "hunter2").await.unwrap();
        assert_eq!(session.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_popup_closed_without_scripted_account() {
        let (gate, _connection) = gate();
        let err = gate
            .sign_in_with_popup(OAuthProvider::Google)
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::PopupClosed);
    }

    #[tokio::test]
    async fn test_popup_sign_in_creates_profile_once() {
        let gate = gate_with_popup();
        let first = gate
            .sign_in_with_popup(OAuthProvider::Google)
            .await
            .unwrap();
        assert_eq!(first.display_name.as_deref(), Some("Grace Hopper"));

        // Second popup sign-in reuses the same account and document.
        let second = gate
            .sign_in_with_popup(OAuthProvider::Google)
            .await
            .unwrap();
        assert_eq!(first.user_id, second.user_id);
    }

    #[tokio::test]
    async fn test_password_reset_requires_email() {
        let (gate, _connection) = gate();
        let err = gate.send_password_reset("  ").await.unwrap_err();
        assert_eq!(err, AuthError::EmailRequired);
        assert!(gate.send_password_reset("ada@example.com").await.is_ok());
    }
}
