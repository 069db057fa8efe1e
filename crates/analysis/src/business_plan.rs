//! Business plan generation from a validated request.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use domain::entities::{BusinessPlanRequest, GeneratedBusinessPlan};
use llm::TextGenerator;
use tracing::{info, instrument, warn};

use crate::errors::AnalysisResult;
use crate::normalizer;
use crate::prompts;
use crate::service::accept;

pub struct BusinessPlanService {
    generator: Arc<dyn TextGenerator>,
}

impl BusinessPlanService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Fails before any call when `companyName` or `industry` is blank.
    /// Generation and parse errors are surfaced; there is no demo plan.
    #[instrument(skip_all, fields(company = %request.company_name))]
    pub async fn generate_business_plan(
        &self,
        request: &BusinessPlanRequest,
    ) -> AnalysisResult<GeneratedBusinessPlan> {
        request.validate()?;

        let generated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let prompt = prompts::business_plan_prompt(request, &generated_at);
        let raw = self.generator.generate(&prompt).await?;
        let value = normalizer::parse_json(&raw).map_err(|e| {
            warn!(raw = %raw, "business plan response is not valid JSON");
            e
        })?;

        let plan = accept(
            "business_plan",
            normalizer::business_plan_from_value(&value, request, &generated_at),
        );
        info!(sections = plan.sections().len(), "business plan generated");
        Ok(plan)
    }
}
