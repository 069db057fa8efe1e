//! Builds every service of the application from one configuration.

use analysis::{AnalysisService, BusinessPlanService};
use async_trait::async_trait;
use domain::config::{LlmConfig, PrediktorConfig};
use domain::DomainError;
use export::PdfExporter;
use infrastructure::paths;
use llm::{GeminiProvider, GeminiSettings, GenerationConfig, LlmError, LlmResult, TextGenerator};
use std::sync::Arc;
use storage::SqliteStore;
use tracing::{info, warn};

use crate::services::{
    AnalysisWorkflow, AuthService, BusinessPlanWorkflow, ExportWorkflow, HistoryService,
    InsightsWorkflow, ProfileService,
};
use crate::ApplicationResult;

pub struct AppContainer {
    pub auth: AuthService,
    pub analysis: AnalysisWorkflow,
    pub business_plans: BusinessPlanWorkflow,
    pub insights: InsightsWorkflow,
    pub profiles: ProfileService,
    pub history: HistoryService,
    pub export: ExportWorkflow,
}

impl AppContainer {
    pub fn from_config(config: &PrediktorConfig) -> ApplicationResult<Self> {
        let db_path = paths::database_path(config);
        let store = SqliteStore::open(&db_path, config.storage.pool_size).map_err(DomainError::from)?;
        info!(path = %db_path.display(), "store opened");

        Ok(Self::with_parts(
            Arc::new(store),
            generator_from_config(&config.llm),
            PdfExporter::new(config.export.output_dir.clone()),
        ))
    }

    /// One store backs every repository port
    pub fn with_parts(
        store: Arc<SqliteStore>,
        generator: Arc<dyn TextGenerator>,
        exporter: PdfExporter,
    ) -> Self {
        Self {
            auth: AuthService::new(store.clone(), store.clone(), store.clone()),
            analysis: AnalysisWorkflow::new(
                AnalysisService::new(generator.clone()),
                store.clone(),
                store.clone(),
            ),
            business_plans: BusinessPlanWorkflow::new(
                BusinessPlanService::new(generator),
                store.clone(),
            ),
            insights: InsightsWorkflow::new(store.clone(), store.clone()),
            profiles: ProfileService::new(store.clone()),
            history: HistoryService::new(store.clone()),
            export: ExportWorkflow::new(store, exporter),
        }
    }
}

/// Gemini client when a key is configured; otherwise a generator that
/// always fails, so analyses fall back to demo data.
pub fn generator_from_config(config: &LlmConfig) -> Arc<dyn TextGenerator> {
    let Some(api_key) = config.api_key.as_deref() else {
        warn!("no generative API key configured");
        return Arc::new(UnavailableGenerator::new(LlmError::MissingApiKey));
    };

    let settings = GeminiSettings::new(api_key)
        .with_base_url(config.base_url.clone())
        .with_model(config.model.clone())
        .with_generation(GenerationConfig {
            temperature: config.temperature,
            top_k: config.top_k,
            top_p: config.top_p,
            max_output_tokens: config.max_output_tokens,
        });

    match GeminiProvider::new(settings) {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            warn!(error = %e, "generative client unavailable");
            Arc::new(UnavailableGenerator::new(e))
        }
    }
}

/// Fails every call with the reason the real client could not be built
pub struct UnavailableGenerator {
    reason: LlmError,
}

impl UnavailableGenerator {
    pub fn new(reason: LlmError) -> Self {
        Self { reason }
    }
}

#[async_trait]
impl TextGenerator for UnavailableGenerator {
    async fn generate(&self, _prompt: &str) -> LlmResult<String> {
        Err(self.reason.clone())
    }

    fn model(&self) -> &str {
        "unavailable"
    }
}
