//! Profile reads and updates over the `users` collection.

use std::sync::Arc;

use anyhow::Result;
use log::{error, info, warn};
use shared::{Session, UpdateProfileRequest, UserProfile, DEFAULT_PROFILE_IMAGE};

use crate::store::{Connection, UserStorage};

pub struct ProfileService<C: Connection> {
    user_repository: C::UserRepository,
}

impl<C: Connection> ProfileService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let user_repository = connection.create_user_repository();
        Self { user_repository }
    }

    /// Profile for the session user. A missing or unreadable document falls
    /// back to what the session itself carries instead of failing the view.
    pub fn get_profile(&self, session: &Session) -> UserProfile {
        match self.user_repository.get_user(&session.user_id) {
            Ok(Some(profile)) => profile,
            Ok(None) => self.fallback_profile(session),
            Err(e) => {
                warn!("failed to read profile for {}: {}", session.user_id, e);
                self.fallback_profile(session)
            }
        }
    }

    /// Name shown in greetings: the stored full name, or the email when the
    /// profile has none.
    pub fn display_name(&self, session: &Session) -> String {
        let profile = self.get_profile(session);
        if profile.full_name.is_empty() {
            session.email.clone()
        } else {
            profile.full_name
        }
    }

    /// Update the mutable profile fields. An empty image is replaced by the
    /// default avatar.
    pub fn update_profile(
        &self,
        session: &Session,
        request: UpdateProfileRequest,
    ) -> Result<UserProfile> {
        let mut profile = self.get_profile(session);
        profile.full_name = request.full_name;
        profile.bio = request.bio;
        profile.profile_image = if request.profile_image.is_empty() {
            DEFAULT_PROFILE_IMAGE.to_string()
        } else {
            request.profile_image
        };

        // store_user rather than update_user: a fallback profile may not have
        // a document yet.
        self.user_repository.store_user(&profile).map_err(|e| {
            error!("failed to update profile for {}: {}", session.user_id, e);
            e
        })?;
        info!("updated profile for {}", session.user_id);
        Ok(profile)
    }

    fn fallback_profile(&self, session: &Session) -> UserProfile {
        UserProfile {
            id: session.user_id.clone(),
            email: session.email.clone(),
            full_name: session.display_name.clone().unwrap_or_default(),
            bio: String::new(),
            profile_image: DEFAULT_PROFILE_IMAGE.to_string(),
        }
    }
}
