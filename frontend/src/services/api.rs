//! Client used by every page to reach auth, records and profiles.
//!
//! The client owns one connection and the services built over it, so all
//! pages see the same store and the same live subscriptions. Swapping the
//! local connection for a hosted one only touches `new_local`.

use std::rc::Rc;
use std::sync::Arc;

use pennyflow_backend::auth::{AuthGate, LocalIdentity, OAuthProvider};
use pennyflow_backend::domain::commands::records::UpdateRecordCommand;
use pennyflow_backend::domain::{ProfileService, RecordService};
use pennyflow_backend::store::{MemoryConnection, RecordSubscription};
use shared::{
    Record, RecordKind, Session, SubmitRecordRequest, UpdateProfileRequest, UserProfile,
};

#[derive(Clone)]
pub struct ApiClient {
    auth: Rc<AuthGate<LocalIdentity, MemoryConnection>>,
    records: Rc<RecordService<MemoryConnection>>,
    profiles: Rc<ProfileService<MemoryConnection>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

// Pages take the client as a prop; two clones of the same client are equal.
impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.records, &other.records)
    }
}

impl ApiClient {
    /// Client over the in-browser store. The popup account makes the
    /// provider sign-in button usable without a real identity provider.
    pub fn new_local() -> Self {
        let connection = Arc::new(MemoryConnection::new());
        let provider =
            LocalIdentity::new().with_popup_account("demo@pennyflow.app", "Demo User");
        Self {
            auth: Rc::new(AuthGate::new(provider, Arc::clone(&connection))),
            records: Rc::new(RecordService::new(Arc::clone(&connection))),
            profiles: Rc::new(ProfileService::new(connection)),
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, String> {
        self.auth
            .sign_in(email, password)
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn sign_in_with_google(&self) -> Result<Session, String> {
        self.auth
            .sign_in_with_popup(OAuthProvider::Google)
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn sign_up(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, String> {
        self.auth
            .sign_up(full_name, email, password)
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn send_password_reset(&self, email: &str) -> Result<(), String> {
        self.auth
            .send_password_reset(email)
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn sign_out(&self) {
        self.auth.sign_out().await;
    }

    pub fn create_record(
        &self,
        session: &Session,
        request: SubmitRecordRequest,
    ) -> Result<Record, String> {
        self.records
            .create_record(session, request)
            .map_err(|e| e.to_string())
    }

    pub fn update_record(
        &self,
        session: &Session,
        command: UpdateRecordCommand,
    ) -> Result<Record, String> {
        self.records
            .update_record(session, command)
            .map_err(|e| e.to_string())
    }

    pub fn delete_record(
        &self,
        session: &Session,
        kind: RecordKind,
        record_id: &str,
    ) -> Result<bool, String> {
        self.records
            .delete_record(session, kind, record_id)
            .map_err(|e| e.to_string())
    }

    /// Live query for the session user's records of one kind. The caller is
    /// responsible for cancelling the subscription when its view unmounts.
    pub fn subscribe(&self, session: &Session, kind: RecordKind) -> RecordSubscription {
        self.records.subscribe(session, kind)
    }

    pub fn get_profile(&self, session: &Session) -> UserProfile {
        self.profiles.get_profile(session)
    }

    pub fn display_name(&self, session: &Session) -> String {
        self.profiles.display_name(session)
    }

    pub fn update_profile(
        &self,
        session: &Session,
        request: UpdateProfileRequest,
    ) -> Result<UserProfile, String> {
        self.profiles
            .update_profile(session, request)
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_of_one_client_compare_equal() {
        let client = ApiClient::new_local();
        let clone = client.clone();
        assert_eq!(client, clone);

        let other = ApiClient::new_local();
        assert_ne!(client, other);
    }
}
