//! Credential and session persistence behind the auth boundary

use crate::entities::{Credential, Session};
use crate::errors::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Store a new credential. Fails with `AccountExists` on a duplicate email.
    async fn insert_credential(&self, credential: &Credential) -> DomainResult<()>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Credential>>;

    /// Persist the failed-attempt counter and lock of an account.
    /// Fails with `RecordNotFound` when no credential has this email.
    async fn update_login_state(
        &self,
        email: &str,
        failed_attempts: u32,
        locked_until: Option<DateTime<Utc>>,
    ) -> DomainResult<()>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn insert_session(&self, session: &Session) -> DomainResult<()>;

    async fn find_session(&self, token: &str) -> DomainResult<Option<Session>>;

    /// Returns whether a session was actually removed
    async fn revoke_session(&self, token: &str) -> DomainResult<bool>;
}
