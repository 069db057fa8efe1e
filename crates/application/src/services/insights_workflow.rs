use analysis::derive_insights;
use chrono::{DateTime, Utc};
use domain::entities::{Collection, InsightReport, Session};
use domain::{HistoryRepository, ProfileRepository};
use std::sync::Arc;
use tracing::{info, instrument};

use super::history_service::latest_analysis;
use super::{log_dropped_write, profile_context};
use crate::ApplicationResult;

/// Derives insights from the latest stored analysis and keeps them as a prediction
pub struct InsightsWorkflow {
    history: Arc<dyn HistoryRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl InsightsWorkflow {
    pub fn new(history: Arc<dyn HistoryRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { history, profiles }
    }

    #[instrument(skip_all, fields(user_id = %session.user_id))]
    pub async fn generate(
        &self,
        session: &Session,
        now: DateTime<Utc>,
    ) -> ApplicationResult<InsightReport> {
        let latest = latest_analysis(self.history.as_ref(), &session.user_id).await?;
        let ctx = profile_context(self.profiles.as_ref(), &session.user_id).await;

        // Only live analyses are ever stored
        let report = derive_insights(&latest.record, false, &ctx.company_name, now);
        info!(
            analysis_id = %latest.id,
            gap = report.benchmark_data.gap,
            "insights derived"
        );

        log_dropped_write(
            Collection::Predictions,
            &session.user_id,
            self.history.save_prediction(&session.user_id, &report).await,
        );
        Ok(report)
    }
}
