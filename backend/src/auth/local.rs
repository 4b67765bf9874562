//! In-memory identity provider.
//!
//! Implements the identity boundary without a network, for local mode and
//! tests. Password accounts live in a map; the OAuth popup flow is scripted
//! through an optional pre-configured account and reports `PopupClosed`
//! otherwise, matching how a dismissed popup surfaces in the real provider.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use shared::Session;
use uuid::Uuid;

use super::{AuthError, IdentityProvider, OAuthProvider};

struct Account {
    user_id: String,
    password: String,
    display_name: Option<String>,
    created_at: String,
}

impl Account {
    fn session(&self, email: &str) -> Session {
        Session {
            user_id: self.user_id.clone(),
            email: email.to_string(),
            display_name: self.display_name.clone(),
            created_at: self.created_at.clone(),
        }
    }
}

#[derive(Clone)]
struct PopupAccount {
    email: String,
    display_name: String,
}

pub struct LocalIdentity {
    accounts: Mutex<HashMap<String, Account>>,
    popup_account: Option<PopupAccount>,
}

impl LocalIdentity {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            popup_account: None,
        }
    }

    /// Script the popup flow to succeed with the given account.
    pub fn with_popup_account(mut self, email: &str, display_name: &str) -> Self {
        self.popup_account = Some(PopupAccount {
            email: email.to_string(),
            display_name: display_name.to_string(),
        });
        self
    }

    fn lock_accounts(&self) -> std::sync::MutexGuard<'_, HashMap<String, Account>> {
        self.accounts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for LocalIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentity {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let accounts = self.lock_accounts();
        match accounts.get(email) {
            Some(account) if account.password == password => Ok(account.session(email)),
            _ => Err(AuthError::InvalidCredential),
        }
    }

    async fn sign_in_with_popup(&self, _provider: OAuthProvider) -> Result<Session, AuthError> {
        let popup = self
            .popup_account
            .clone()
            .ok_or(AuthError::PopupClosed)?;

        let mut accounts = self.lock_accounts();
        let account = accounts.entry(popup.email.clone()).or_insert_with(|| Account {
            user_id: Uuid::new_v4().to_string(),
            password: String::new(),
            display_name: Some(popup.display_name.clone()),
            created_at: Utc::now().to_rfc3339(),
        });
        Ok(account.session(&popup.email))
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let mut accounts = self.lock_accounts();
        if accounts.contains_key(email) {
            return Err(AuthError::EmailInUse);
        }
        let account = Account {
            user_id: Uuid::new_v4().to_string(),
            password: password.to_string(),
            display_name: None,
            created_at: Utc::now().to_rfc3339(),
        };
        let session = account.session(email);
        accounts.insert(email.to_string(), account);
        Ok(session)
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        // No mail in local mode; an unknown address is not revealed either
        // way, matching the hosted provider.
        info!("password reset requested for {}", email);
        Ok(())
    }

    async fn sign_out(&self) {
        // Sessions are held by the caller; nothing provider-side to clear.
    }
}
