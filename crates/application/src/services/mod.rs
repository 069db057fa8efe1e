//! Workflows of the application layer.
//!
//! Each workflow takes the caller's [`domain::entities::Session`] explicitly;
//! nothing reads a global current user.

pub mod analysis_workflow;
pub mod auth_service;
pub mod business_plan_workflow;
pub mod export_workflow;
pub mod history_service;
pub mod insights_workflow;
pub mod profile_service;

pub use analysis_workflow::AnalysisWorkflow;
pub use auth_service::AuthService;
pub use business_plan_workflow::BusinessPlanWorkflow;
pub use export_workflow::ExportWorkflow;
pub use history_service::HistoryService;
pub use insights_workflow::InsightsWorkflow;
pub use profile_service::ProfileService;

use domain::entities::{Collection, ProfileContext, StoredRecord};
use domain::{DomainResult, ProfileRepository, UserId};
use tracing::{debug, warn};

/// History writes never fail a workflow: the error is logged and dropped
pub(crate) fn log_dropped_write<T>(
    collection: Collection,
    user_id: &UserId,
    result: DomainResult<StoredRecord<T>>,
) -> Option<String> {
    match result {
        Ok(stored) => {
            debug!(%collection, id = %stored.id, "history record saved");
            Some(stored.id)
        }
        Err(e) => {
            warn!(%collection, %user_id, error = %e, "history write dropped");
            None
        }
    }
}

/// Prompt context from the user's profile; a failed read falls back to defaults
pub(crate) async fn profile_context(
    profiles: &dyn ProfileRepository,
    user_id: &UserId,
) -> ProfileContext {
    match profiles.load_profile(user_id).await {
        Ok(profile) => ProfileContext::from_profile(profile.as_ref()),
        Err(e) => {
            warn!(%user_id, error = %e, "profile unavailable, using default context");
            ProfileContext::default()
        }
    }
}
