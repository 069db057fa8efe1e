//! Repository Abstractions - ports implemented by the storage crate

mod auth_repository;
mod history_repository;
mod profile_repository;

pub use auth_repository::{CredentialRepository, SessionRepository};
pub use history_repository::HistoryRepository;
pub use profile_repository::ProfileRepository;
