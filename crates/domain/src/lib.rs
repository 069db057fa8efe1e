//! Domain Layer - Prediktor business model
//!
//! Pure business types and rules with no dependency on storage, network or UI:
//! - Entities: company figures, analyses, plans, profiles, history records
//! - Value Objects: user ids, competitive position, analysis outcome
//! - Repository Abstractions: ports implemented by the storage crate
//! - Config: serde model of the application configuration
//! - Format: French number and date display

pub mod config;
pub mod entities;
pub mod errors;
pub mod format;
pub mod repositories;
pub mod value_objects;

pub use config::{PrediktorConfig, Profile};
pub use entities::{
    ActionPlan, CompanyData, ComparativeAnalysis, GeneratedBusinessPlan, HealthScore,
    InsightReport, ProfileContext, SectorData, StoredRecord, UserProfile,
};
pub use errors::{DomainError, DomainResult, ErrorCategory};
pub use repositories::{
    CredentialRepository, HistoryRepository, ProfileRepository, SessionRepository,
};
pub use value_objects::{AnalysisOutcome, PositionKind, UserId};
