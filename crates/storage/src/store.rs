use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::entities::{Collection, StoredRecord};
use domain::UserId;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::clock::MonotonicClock;
use crate::errors::{StorageError, StorageResult};

type DbPool = Pool<SqliteConnectionManager>;

/// SQLite document store behind an r2d2 pool
pub struct SqliteStore {
    pool: Arc<DbPool>,
    clock: MonotonicClock,
}

impl SqliteStore {
    /// Open (or create) the database file and apply the schema
    pub fn open<P: AsRef<Path>>(path: P, pool_size: u32) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| StorageError::Corrupt {
                    table: "database",
                    reason: format!("cannot create {}: {e}", parent.display()),
                })?;
            }
        }

        let manager = SqliteConnectionManager::file(path)
            .with_init(|conn| conn.execute_batch("PRAGMA busy_timeout = 5000;"));
        let pool = Pool::builder().max_size(pool_size.max(1)).build(manager)?;

        let newest = {
            let conn = pool.get()?;
            Self::init_schema(&conn)?;
            Self::newest_timestamp(&conn)?
        };
        let clock = match newest {
            Some(at) => MonotonicClock::starting_after(at),
            None => MonotonicClock::new(),
        };

        info!(path = %path.display(), pool_size, "document store opened");
        Ok(Self {
            pool: Arc::new(pool),
            clock,
        })
    }

    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            -- History collections: analyses, predictions, businessPlans
            CREATE TABLE IF NOT EXISTS documents (
                id TEXT PRIMARY KEY,
                collection TEXT NOT NULL,
                user_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                body TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_documents_owner
                ON documents(collection, user_id, created_at DESC);

            -- One profile per user; industry and completeness mirrored for queries
            CREATE TABLE IF NOT EXISTS users (
                user_id TEXT PRIMARY KEY,
                email TEXT NOT NULL,
                industry TEXT NOT NULL DEFAULT '',
                is_complete INTEGER NOT NULL DEFAULT 0,
                body TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_users_industry ON users(industry, is_complete);

            CREATE TABLE IF NOT EXISTS credentials (
                email TEXT PRIMARY KEY,
                user_id TEXT NOT NULL UNIQUE,
                salt TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                iterations INTEGER NOT NULL,
                failed_attempts INTEGER NOT NULL DEFAULT 0,
                locked_until TEXT,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS sessions (
                token TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                email TEXT NOT NULL,
                issued_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    fn newest_timestamp(conn: &Connection) -> StorageResult<Option<DateTime<Utc>>> {
        let newest: Option<String> = conn
            .query_row("SELECT MAX(created_at) FROM documents", [], |row| {
                row.get::<_, Option<String>>(0)
            })
            .optional()?
            .flatten();
        newest.map(|text| parse_timestamp("documents", &text)).transpose()
    }

    pub(crate) fn conn(&self) -> StorageResult<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }

    pub(crate) fn clock(&self) -> &MonotonicClock {
        &self.clock
    }

    /// Append a record to a history collection
    #[instrument(skip(self, record), fields(collection = %collection))]
    pub(crate) fn append<T: Serialize + Clone>(
        &self,
        collection: Collection,
        user_id: &UserId,
        record: &T,
    ) -> StorageResult<StoredRecord<T>> {
        let body = serde_json::to_string(record)?;
        let id = Uuid::new_v4().to_string();
        let created_at = self.clock.next_iso();

        self.conn()?.execute(
            "INSERT INTO documents (id, collection, user_id, created_at, body)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, collection.name(), user_id.as_str(), created_at, body],
        )?;
        debug!(%id, "document appended");

        Ok(StoredRecord {
            id,
            user_id: user_id.clone(),
            created_at,
            record: record.clone(),
        })
    }

    /// Records of one owner, newest first. Rows whose body no longer
    /// decodes are logged and skipped so the rest stay readable.
    pub(crate) fn list<T: DeserializeOwned>(
        &self,
        collection: Collection,
        user_id: &UserId,
    ) -> StorageResult<Vec<StoredRecord<T>>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, created_at, body FROM documents
             WHERE collection = ?1 AND user_id = ?2
             ORDER BY created_at DESC",
        )?;
        let rows = stmt
            .query_map(params![collection.name(), user_id.as_str()], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows
            .into_iter()
            .filter_map(|(id, created_at, body)| match serde_json::from_str(&body) {
                Ok(record) => Some(StoredRecord {
                    id,
                    user_id: user_id.clone(),
                    created_at,
                    record,
                }),
                Err(e) => {
                    warn!(%collection, %id, error = %e, "skipping undecodable document");
                    None
                }
            })
            .collect())
    }
}

pub(crate) fn parse_timestamp(table: &'static str, text: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| StorageError::Corrupt {
            table,
            reason: format!("bad timestamp '{text}': {e}"),
        })
}

pub(crate) fn parse_user_id(table: &'static str, text: &str) -> StorageResult<UserId> {
    UserId::parse(text).map_err(|e| StorageError::Corrupt {
        table,
        reason: e.to_string(),
    })
}
