use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::entities::{Credential, Session};
use domain::{CredentialRepository, DomainError, DomainResult, SessionRepository};
use rusqlite::{params, ErrorCode, OptionalExtension};

use crate::clock::format_timestamp;
use crate::errors::{StorageError, StorageResult};
use crate::store::{parse_timestamp, parse_user_id, SqliteStore};

fn is_unique_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

#[async_trait]
impl CredentialRepository for SqliteStore {
    async fn insert_credential(&self, credential: &Credential) -> DomainResult<()> {
        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT INTO credentials
                 (email, user_id, salt, password_hash, iterations, failed_attempts, locked_until, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                credential.email,
                credential.user_id.as_str(),
                credential.salt,
                credential.password_hash,
                credential.iterations,
                credential.failed_attempts,
                credential.locked_until.map(format_timestamp),
                format_timestamp(credential.created_at),
            ],
        );
        match inserted {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => {
                Err(DomainError::AccountExists(credential.email.clone()))
            }
            Err(e) => Err(StorageError::from(e).into()),
        }
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Credential>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT email, user_id, salt, password_hash, iterations, failed_attempts,
                        locked_until, created_at
                 FROM credentials WHERE email = ?1",
                params![email],
                |row| {
                    Ok(CredentialRow {
                        email: row.get(0)?,
                        user_id: row.get(1)?,
                        salt: row.get(2)?,
                        password_hash: row.get(3)?,
                        iterations: row.get(4)?,
                        failed_attempts: row.get(5)?,
                        locked_until: row.get(6)?,
                        created_at: row.get(7)?,
                    })
                },
            )
            .optional()
            .map_err(StorageError::from)?;

        Ok(row.map(CredentialRow::into_credential).transpose()?)
    }

    async fn update_login_state(
        &self,
        email: &str,
        failed_attempts: u32,
        locked_until: Option<DateTime<Utc>>,
    ) -> DomainResult<()> {
        let updated = self
            .conn()?
            .execute(
                "UPDATE credentials SET failed_attempts = ?2, locked_until = ?3 WHERE email = ?1",
                params![email, failed_attempts, locked_until.map(format_timestamp)],
            )
            .map_err(StorageError::from)?;
        if updated == 0 {
            return Err(DomainError::RecordNotFound(email.to_string()));
        }
        Ok(())
    }
}

struct CredentialRow {
    email: String,
    user_id: String,
    salt: String,
    password_hash: String,
    iterations: u32,
    failed_attempts: u32,
    locked_until: Option<String>,
    created_at: String,
}

impl CredentialRow {
    fn into_credential(self) -> StorageResult<Credential> {
        Ok(Credential {
            user_id: parse_user_id("credentials", &self.user_id)?,
            email: self.email,
            salt: self.salt,
            password_hash: self.password_hash,
            iterations: self.iterations,
            failed_attempts: self.failed_attempts,
            locked_until: self
                .locked_until
                .map(|text| parse_timestamp("credentials", &text))
                .transpose()?,
            created_at: parse_timestamp("credentials", &self.created_at)?,
        })
    }
}

#[async_trait]
impl SessionRepository for SqliteStore {
    async fn insert_session(&self, session: &Session) -> DomainResult<()> {
        self.conn()?
            .execute(
                "INSERT INTO sessions (token, user_id, email, issued_at) VALUES (?1, ?2, ?3, ?4)",
                params![
                    session.token,
                    session.user_id.as_str(),
                    session.email,
                    format_timestamp(session.issued_at),
                ],
            )
            .map_err(StorageError::from)?;
        Ok(())
    }

    async fn find_session(&self, token: &str) -> DomainResult<Option<Session>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT token, user_id, email, issued_at FROM sessions WHERE token = ?1",
                params![token],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()
            .map_err(StorageError::from)?;

        let session = row
            .map(|(token, user_id, email, issued_at)| -> StorageResult<Session> {
                Ok(Session {
                    token,
                    user_id: parse_user_id("sessions", &user_id)?,
                    email,
                    issued_at: parse_timestamp("sessions", &issued_at)?,
                })
            })
            .transpose()?;
        Ok(session)
    }

    async fn revoke_session(&self, token: &str) -> DomainResult<bool> {
        let removed = self
            .conn()?
            .execute("DELETE FROM sessions WHERE token = ?1", params![token])
            .map_err(StorageError::from)?;
        Ok(removed > 0)
    }
}
