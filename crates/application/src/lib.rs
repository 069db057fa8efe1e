//! # Application Layer
//!
//! Workflows joining the analysis services, the SQLite store and the PDF
//! exporter for one signed-in user:
//! - [`services::AuthService`] registers, signs in and guards commands
//! - analysis, business plan and insights workflows persist their results
//!   and never fail on a dropped history write
//! - [`ApplicationError::notice`] turns any failure into a user notice
//!
//! [`AppContainer`] wires everything from a
//! [`domain::config::PrediktorConfig`].

pub mod container;
pub mod errors;
pub mod notice;
pub mod services;

pub use container::{generator_from_config, AppContainer, UnavailableGenerator};
pub use errors::ApplicationError;
pub use notice::UserNotice;

/// Application layer result type
pub type ApplicationResult<T> = Result<T, ApplicationError>;
