//! Accounts and sessions.
//!
//! Passwords are stored as PBKDF2-HMAC-SHA256 with a per-account random
//! salt and the round count kept next to the hash. Failed sign-ins are
//! counted on the credential itself, so the lock survives between runs.
//! A session is an explicit value handed to every workflow that needs a
//! user; [`AuthService::require_session`] is the route guard.

use chrono::{DateTime, Duration, Utc};
use domain::entities::{Credential, Session};
use domain::{
    CredentialRepository, DomainError, ProfileRepository, SessionRepository, UserId,
};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{ApplicationError, ApplicationResult};

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const PBKDF2_ITERATIONS: u32 = 100_000;
const HASH_SIZE: usize = 32;
/// Consecutive failures that lock an address
pub const MAX_FAILED_ATTEMPTS: u32 = 5;
pub const LOCKOUT_MINUTES: i64 = 15;

pub struct AuthService {
    credentials: Arc<dyn CredentialRepository>,
    sessions: Arc<dyn SessionRepository>,
    profiles: Arc<dyn ProfileRepository>,
    iterations: u32,
}

impl AuthService {
    pub fn new(
        credentials: Arc<dyn CredentialRepository>,
        sessions: Arc<dyn SessionRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            credentials,
            sessions,
            profiles,
            iterations: PBKDF2_ITERATIONS,
        }
    }

    /// PBKDF2 rounds for newly registered accounts. Existing hashes keep
    /// the count they were stored with.
    pub fn with_hash_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    /// Create the account and its blank profile, then sign in
    #[instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> ApplicationResult<Session> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ApplicationError::WeakPassword {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        let salt = Uuid::new_v4().simple().to_string();
        let credential = Credential {
            user_id: UserId::generate(),
            email: email.clone(),
            password_hash: hash_password(&salt, password, self.iterations),
            salt,
            iterations: self.iterations,
            failed_attempts: 0,
            locked_until: None,
            created_at: Utc::now(),
        };
        self.credentials.insert_credential(&credential).await?;
        self.profiles
            .create_profile(&credential.user_id, &email)
            .await?;
        info!(user_id = %credential.user_id, "account registered");

        self.open_session(credential.user_id, email).await
    }

    pub async fn login(&self, email: &str, password: &str) -> ApplicationResult<Session> {
        self.login_at(email, password, Utc::now()).await
    }

    /// Sign in as of `now`, which decides whether a lock is still active
    #[instrument(skip(self, password, now))]
    pub async fn login_at(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> ApplicationResult<Session> {
        let email = normalize_email(email)?;
        let credential = self
            .credentials
            .find_by_email(&email)
            .await
            .map_err(|e| ApplicationError::LoginFailed(e.to_string()))?;
        let Some(credential) = credential else {
            warn!("sign-in rejected, unknown address");
            return Err(DomainError::InvalidCredentials.into());
        };

        if credential.is_locked_at(now) {
            warn!("sign-in refused, address locked");
            return Err(ApplicationError::TooManyAttempts { email });
        }

        if verify_password(&credential, password) {
            if credential.failed_attempts > 0 || credential.locked_until.is_some() {
                self.save_login_state(&email, 0, None).await?;
            }
            return self
                .open_session(credential.user_id, email)
                .await
                .map_err(|e| ApplicationError::LoginFailed(e.to_string()));
        }

        // Counting restarts once a lock has expired
        let attempts = if credential.locked_until.is_some() {
            1
        } else {
            credential.failed_attempts + 1
        };
        let locked_until =
            (attempts >= MAX_FAILED_ATTEMPTS).then(|| now + Duration::minutes(LOCKOUT_MINUTES));
        self.save_login_state(&email, attempts, locked_until).await?;
        warn!(attempts, locked = locked_until.is_some(), "sign-in rejected");
        Err(DomainError::InvalidCredentials.into())
    }

    /// Returns whether the session was still active
    pub async fn logout(&self, session: &Session) -> ApplicationResult<bool> {
        let revoked = self.sessions.revoke_session(&session.token).await?;
        info!(user_id = %session.user_id, revoked, "signed out");
        Ok(revoked)
    }

    /// Route guard: resolve a stored token into its session
    pub async fn require_session(&self, token: Option<&str>) -> ApplicationResult<Session> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ApplicationError::Unauthenticated)?;
        self.sessions
            .find_session(token)
            .await?
            .ok_or(ApplicationError::Unauthenticated)
    }

    async fn open_session(&self, user_id: UserId, email: String) -> ApplicationResult<Session> {
        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id,
            email,
            issued_at: Utc::now(),
        };
        self.sessions.insert_session(&session).await?;
        Ok(session)
    }

    async fn save_login_state(
        &self,
        email: &str,
        attempts: u32,
        locked_until: Option<DateTime<Utc>>,
    ) -> ApplicationResult<()> {
        self.credentials
            .update_login_state(email, attempts, locked_until)
            .await
            .map_err(|e| ApplicationError::LoginFailed(e.to_string()))
    }
}

/// Lowercased, trimmed address with one `@` and a dotted domain
pub fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(email)
    } else {
        Err(DomainError::InvalidEmail(email))
    }
}

/// Hex PBKDF2-HMAC-SHA256 of `password` under `salt`
pub fn hash_password(salt: &str, password: &str, iterations: u32) -> String {
    let mut derived = [0u8; HASH_SIZE];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut derived);
    derived.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Constant-time check of `password` against the stored hash
pub fn verify_password(credential: &Credential, password: &str) -> bool {
    let candidate = hash_password(&credential.salt, password, credential.iterations);
    candidate
        .as_bytes()
        .ct_eq(credential.password_hash.as_bytes())
        .into()
}
