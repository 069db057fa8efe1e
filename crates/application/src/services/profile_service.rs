use domain::entities::{ProfileStats, ProfileUpdate, Session, UserProfile};
use domain::{DomainError, ProfileRepository, UserId};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ApplicationResult;

pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// The caller's profile, created blank on first access
    pub async fn show(&self, session: &Session) -> ApplicationResult<UserProfile> {
        match self.profiles.load_profile(&session.user_id).await? {
            Some(profile) => Ok(profile),
            None => Ok(self
                .profiles
                .create_profile(&session.user_id, &session.email)
                .await?),
        }
    }

    /// Users may only change their own profile
    #[instrument(skip(self, session, update), fields(actor = %session.user_id))]
    pub async fn update(
        &self,
        session: &Session,
        owner: &UserId,
        update: ProfileUpdate,
    ) -> ApplicationResult<UserProfile> {
        if owner != &session.user_id {
            return Err(DomainError::NotProfileOwner {
                actor: session.user_id.to_string(),
                owner: owner.to_string(),
            }
            .into());
        }

        self.profiles
            .create_profile(&session.user_id, &session.email)
            .await?;
        let profile = self.profiles.update_profile(owner, update).await?;
        info!(
            complete = profile.is_profile_complete,
            completion = profile.completion_percentage(),
            "profile updated"
        );
        Ok(profile)
    }

    pub async fn users_by_industry(
        &self,
        _session: &Session,
        industry: &str,
    ) -> ApplicationResult<Vec<UserProfile>> {
        Ok(self.profiles.users_by_industry(industry).await?)
    }

    pub async fn stats(&self, _session: &Session) -> ApplicationResult<ProfileStats> {
        Ok(self.profiles.profile_stats().await?)
    }
}
