use analysis::AnalysisService;
use common::OperationTimer;
use domain::entities::{ActionPlan, Collection, CompanyData, ComparativeAnalysis, Session};
use domain::{AnalysisOutcome, HistoryRepository, ProfileRepository};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{log_dropped_write, profile_context};
use crate::{ApplicationError, ApplicationResult};

/// Comparative analysis and action plan for the signed-in user
pub struct AnalysisWorkflow {
    service: AnalysisService,
    history: Arc<dyn HistoryRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl AnalysisWorkflow {
    pub fn new(
        service: AnalysisService,
        history: Arc<dyn HistoryRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            service,
            history,
            profiles,
        }
    }

    /// Validates the figures before any call. Only live analyses are
    /// stored; a demo outcome is returned but never persisted.
    #[instrument(skip_all, fields(user_id = %session.user_id, sector = %company.sector))]
    pub async fn run_analysis(
        &self,
        session: &Session,
        company: &CompanyData,
    ) -> ApplicationResult<AnalysisOutcome> {
        company.validate()?;
        let ctx = profile_context(self.profiles.as_ref(), &session.user_id).await;

        let timer = OperationTimer::new("comparative_analysis");
        let outcome = self.service.generate_comparative_analysis(company, &ctx).await;
        info!(
            demo = outcome.is_demo(),
            duration_ms = timer.elapsed_ms(),
            "comparative analysis finished"
        );

        if let AnalysisOutcome::Live(analysis) = &outcome {
            log_dropped_write(
                Collection::Analyses,
                &session.user_id,
                self.history.save_analysis(&session.user_id, analysis).await,
            );
        } else {
            info!("demo analysis returned, not stored");
        }
        Ok(outcome)
    }

    #[instrument(skip_all, fields(user_id = %session.user_id))]
    pub async fn action_plan(
        &self,
        session: &Session,
        analysis: &ComparativeAnalysis,
    ) -> ApplicationResult<ActionPlan> {
        let ctx = profile_context(self.profiles.as_ref(), &session.user_id).await;

        let timer = OperationTimer::new("action_plan");
        let result = self
            .service
            .generate_action_plan(analysis, &ctx)
            .await
            .map_err(ApplicationError::ActionPlan);
        timer.finish_with_result(&result);
        result
    }
}
