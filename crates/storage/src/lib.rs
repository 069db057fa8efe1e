//! SQLite persistence for Prediktor.
//!
//! One [`SqliteStore`] implements every repository port of the domain:
//! history collections, profiles, credentials and sessions.

mod auth;
mod clock;
mod errors;
mod history;
mod profiles;
mod store;

pub use clock::MonotonicClock;
pub use errors::{StorageError, StorageResult};
pub use store::SqliteStore;
