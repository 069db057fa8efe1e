//! Comparative analysis and action plan generation.

use std::sync::Arc;
use std::time::Instant;

use domain::entities::{
    ActionPlan, CompanyData, ComparativeAnalysis, HealthScore, ProfileContext, SectorData,
};
use domain::AnalysisOutcome;
use llm::TextGenerator;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::errors::AnalysisResult;
use crate::fallback::demo_analysis;
use crate::normalizer::{self, Normalized};
use crate::prompts;

/// Drives the generation chain through a [`TextGenerator`].
///
/// Every call is awaited in turn; nothing is retried.
pub struct AnalysisService {
    generator: Arc<dyn TextGenerator>,
}

impl AnalysisService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// One generation round trip, parsed but not yet normalized
    async fn ask(&self, step: &'static str, prompt: String) -> AnalysisResult<Value> {
        let started = Instant::now();
        let raw = self.generator.generate(&prompt).await?;
        debug!(
            step,
            chars = raw.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generation finished"
        );
        normalizer::parse_json(&raw).map_err(|e| {
            warn!(step, raw = %raw, "model response is not valid JSON");
            e
        })
    }

    #[instrument(skip(self, ctx))]
    pub async fn analyze_sector_data(
        &self,
        sector: &str,
        ctx: &ProfileContext,
    ) -> AnalysisResult<SectorData> {
        let value = self
            .ask("sector", prompts::sector_prompt(sector, ctx))
            .await?;
        Ok(accept(
            "sector",
            normalizer::sector_data_from_value(&value, sector),
        ))
    }

    #[instrument(skip_all, fields(sector = %company.sector))]
    pub async fn calculate_health_score(
        &self,
        company: &CompanyData,
        sector: &SectorData,
        ctx: &ProfileContext,
    ) -> AnalysisResult<HealthScore> {
        let value = self
            .ask("health", prompts::health_prompt(company, sector, ctx))
            .await?;
        Ok(accept("health", normalizer::health_score_from_value(&value)))
    }

    /// Sector data, then health score, then the comparative delta.
    ///
    /// Never fails: any error in the chain yields [`AnalysisOutcome::Demo`]
    /// built from the caller's company data.
    #[instrument(skip_all, fields(sector = %company.sector))]
    pub async fn generate_comparative_analysis(
        &self,
        company: &CompanyData,
        ctx: &ProfileContext,
    ) -> AnalysisOutcome {
        match self.comparative_chain(company, ctx).await {
            Ok(analysis) => {
                info!("comparative analysis generated");
                AnalysisOutcome::Live(analysis)
            }
            Err(e) => {
                warn!(error = %e, quota = e.is_quota(), "comparative analysis failed, using demo data");
                AnalysisOutcome::Demo(demo_analysis(company))
            }
        }
    }

    async fn comparative_chain(
        &self,
        company: &CompanyData,
        ctx: &ProfileContext,
    ) -> AnalysisResult<ComparativeAnalysis> {
        let sector = self.analyze_sector_data(&company.sector, ctx).await?;
        let health = self.calculate_health_score(company, &sector, ctx).await?;
        let value = self
            .ask(
                "comparative",
                prompts::comparative_prompt(company, &sector, &health, ctx),
            )
            .await?;
        let delta = accept("comparative", normalizer::analysis_delta_from_value(&value));
        Ok(ComparativeAnalysis::assemble(
            company.clone(),
            sector,
            health,
            delta,
        ))
    }

    /// Errors surface to the caller; there is no demo plan.
    #[instrument(skip_all, fields(sector = %analysis.company_data.sector))]
    pub async fn generate_action_plan(
        &self,
        analysis: &ComparativeAnalysis,
        ctx: &ProfileContext,
    ) -> AnalysisResult<ActionPlan> {
        let value = self
            .ask("action_plan", prompts::action_plan_prompt(analysis, ctx))
            .await?;
        let plan = accept("action_plan", normalizer::action_plan_from_value(&value));
        info!(actions = plan.action_count(), "action plan generated");
        Ok(plan)
    }
}

pub(crate) fn accept<T>(step: &'static str, normalized: Normalized<T>) -> T {
    if !normalized.is_clean() {
        warn!(
            step,
            fields = ?normalized.defaulted,
            "response fields replaced by defaults"
        );
    }
    normalized.into_value()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use domain::PositionKind;
    use llm::{LlmError, LlmResult};
    use mockall::Sequence;

    mockall::mock! {
        pub Generator {}

        #[async_trait]
        impl TextGenerator for Generator {
            async fn generate(&self, prompt: &str) -> LlmResult<String>;
            fn model(&self) -> &str;
        }
    }

    pub(crate) const SECTOR_JSON: &str = r#"{
        "sector": "Commerce",
        "averageRevenue": 40000000,
        "averageExpenses": 30000000,
        "averageEmployees": 20,
        "growthRate": 8,
        "marketSize": 900000000,
        "keyMetrics": {"profitability": 25, "efficiency": 60, "marketShare": 5},
        "trends": ["Mobile money"],
        "challenges": ["Logistique"],
        "opportunities": ["Export"]
    }"#;

    const HEALTH_JSON: &str = r#"```json
    {"overall": 68, "profitability": 72, "efficiency": 61, "growth": 55, "marketPosition": 70,
     "details": {"strengths": ["Marge"], "weaknesses": ["Taille"], "recommendations": ["Recruter"]}}
    ```"#;

    const DELTA_JSON: &str = r#"{
        "competitivePosition": {"score": 81, "position": "leader", "description": "Bien placé"},
        "recommendations": {"immediate": ["A"], "shortTerm": ["B"], "longTerm": ["C"]},
        "charts": {
            "revenueComparison": [{"company": 5000000, "sector": 40000000, "label": "Revenus"}],
            "profitabilityTrend": [{"company": 30, "sector": 25, "period": "2024"}],
            "marketPosition": [{"metric": "Croissance", "company": 55, "sector": 8}]
        }
    }"#;

    fn commerce() -> CompanyData {
        CompanyData {
            year: "2024".to_string(),
            revenue: 5_000_000.0,
            expenses: 3_500_000.0,
            employees: 10,
            sector: "Commerce".to_string(),
            market: "Local".to_string(),
        }
    }

    fn service(mock: MockGenerator) -> AnalysisService {
        AnalysisService::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_chain_runs_in_order_and_is_live() {
        let mut mock = MockGenerator::new();
        let mut seq = Sequence::new();
        mock.expect_generate()
            .withf(|prompt| prompt.contains("expert en analyse sectorielle"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(SECTOR_JSON.to_string()));
        mock.expect_generate()
            .withf(|prompt| prompt.contains("Calcule un score de santé"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(HEALTH_JSON.to_string()));
        mock.expect_generate()
            .withf(|prompt| prompt.contains("analyse comparative complète"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(DELTA_JSON.to_string()));

        let outcome = service(mock)
            .generate_comparative_analysis(&commerce(), &ProfileContext::default())
            .await;

        assert!(!outcome.is_demo());
        let analysis = outcome.analysis();
        assert_eq!(analysis.company_data, commerce());
        assert_eq!(analysis.sector_data.growth_rate, 8.0);
        assert_eq!(analysis.health_score.overall, 68.0);
        assert_eq!(analysis.competitive_position.position, PositionKind::Leader);
        assert_eq!(analysis.recommendations.short_term, vec!["B".to_string()]);
    }

    #[tokio::test]
    async fn test_quota_error_yields_demo_with_caller_input() {
        let mut mock = MockGenerator::new();
        mock.expect_generate()
            .times(1)
            .returning(|_| Err(LlmError::QuotaExceeded { body: String::new() }));

        let company = commerce();
        let outcome = service(mock)
            .generate_comparative_analysis(&company, &ProfileContext::default())
            .await;

        assert!(outcome.is_demo());
        assert_eq!(outcome.analysis().company_data, company);
        assert_eq!(outcome.analysis(), &demo_analysis(&company));
    }

    #[tokio::test]
    async fn test_unparseable_third_step_yields_demo() {
        let mut mock = MockGenerator::new();
        let mut seq = Sequence::new();
        mock.expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(SECTOR_JSON.to_string()));
        mock.expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(HEALTH_JSON.to_string()));
        mock.expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok("Désolé, je ne peux pas répondre.".to_string()));

        let outcome = service(mock)
            .generate_comparative_analysis(&commerce(), &ProfileContext::default())
            .await;

        assert!(outcome.is_demo());
        // Demo data never mixes in partial live results
        assert_eq!(outcome.analysis().sector_data.growth_rate, 12.0);
    }

    #[tokio::test]
    async fn test_sector_data_surfaces_invalid_json() {
        let mut mock = MockGenerator::new();
        mock.expect_generate()
            .returning(|_| Ok("not json".to_string()));

        let err = service(mock)
            .analyze_sector_data("Commerce", &ProfileContext::default())
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON response from Gemini API"));
    }

    #[tokio::test]
    async fn test_sector_prompt_carries_profile_country() {
        let mut mock = MockGenerator::new();
        mock.expect_generate()
            .withf(|prompt| prompt.contains("en Sénégal") && prompt.contains("XOF"))
            .times(1)
            .returning(|_| Ok(r#"{"growthRate": "vite"}"#.to_string()));

        let ctx = ProfileContext {
            country: "Sénégal".to_string(),
            currency: "XOF".to_string(),
            ..ProfileContext::default()
        };
        let sector = service(mock).analyze_sector_data("Agro", &ctx).await.unwrap();
        assert_eq!(sector.sector, "Agro");
        assert_eq!(sector.growth_rate, 12.0);
    }

    #[tokio::test]
    async fn test_action_plan_errors_are_surfaced() {
        let mut mock = MockGenerator::new();
        mock.expect_generate().returning(|_| {
            Err(LlmError::Http {
                status: 503,
                body: String::new(),
            })
        });

        let analysis = demo_analysis(&commerce());
        let err = service(mock)
            .generate_action_plan(&analysis, &ProfileContext::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 503");
        assert!(!err.is_quota());
    }

    #[tokio::test]
    async fn test_action_plan_is_normalized() {
        let mut mock = MockGenerator::new();
        mock.expect_generate()
            .withf(|prompt| prompt.contains("plan d'action détaillé"))
            .returning(|_| {
                Ok(r#"{"objectives": ["Doubler le CA"], "actions": [], "timeline": null}"#.to_string())
            });

        let analysis = demo_analysis(&commerce());
        let plan = service(mock)
            .generate_action_plan(&analysis, &ProfileContext::default())
            .await
            .unwrap();
        assert_eq!(plan.objectives, vec!["Doubler le CA".to_string()]);
        // An empty array is an answer; only a missing one is replaced
        assert!(plan.actions.is_empty());
        assert_eq!(plan.timeline.len(), 3);
    }
}
