//! ProfileRepository - one UserProfile document per user

use crate::entities::{ProfileStats, ProfileUpdate, UserProfile};
use crate::errors::DomainResult;
use crate::value_objects::UserId;
use async_trait::async_trait;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn load_profile(&self, user_id: &UserId) -> DomainResult<Option<UserProfile>>;

    /// Create the blank profile of a new account
    async fn create_profile(&self, user_id: &UserId, email: &str) -> DomainResult<UserProfile>;

    /// Merge a partial update. Fails with `RecordNotFound` when the user has no profile.
    async fn update_profile(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> DomainResult<UserProfile>;

    /// Complete profiles in the given industry
    async fn users_by_industry(&self, industry: &str) -> DomainResult<Vec<UserProfile>>;

    async fn profile_stats(&self) -> DomainResult<ProfileStats>;
}
