use analysis::BusinessPlanService;
use common::OperationTimer;
use domain::entities::{BusinessPlanRequest, Collection, GeneratedBusinessPlan, Session};
use domain::HistoryRepository;
use std::sync::Arc;
use tracing::instrument;

use super::log_dropped_write;
use crate::{ApplicationError, ApplicationResult};

pub struct BusinessPlanWorkflow {
    service: BusinessPlanService,
    history: Arc<dyn HistoryRepository>,
}

impl BusinessPlanWorkflow {
    pub fn new(service: BusinessPlanService, history: Arc<dyn HistoryRepository>) -> Self {
        Self { service, history }
    }

    /// Generate and store the plan. A failed save still returns the plan.
    #[instrument(skip_all, fields(user_id = %session.user_id, company = %request.company_name))]
    pub async fn generate(
        &self,
        session: &Session,
        request: &BusinessPlanRequest,
    ) -> ApplicationResult<GeneratedBusinessPlan> {
        let timer = OperationTimer::new("business_plan");
        let result = self
            .service
            .generate_business_plan(request)
            .await
            .map_err(ApplicationError::BusinessPlan);
        timer.finish_with_result(&result);
        let plan = result?;

        log_dropped_write(
            Collection::BusinessPlans,
            &session.user_id,
            self.history.save_business_plan(&session.user_id, &plan).await,
        );
        Ok(plan)
    }
}
