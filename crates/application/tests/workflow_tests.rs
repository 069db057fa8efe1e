use application::services::{AnalysisWorkflow, AuthService};
use application::{AppContainer, ApplicationError};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use domain::config::PrediktorConfig;
use domain::entities::{
    BusinessPlanRequest, CompanyData, ComparativeAnalysis, GeneratedBusinessPlan, InsightReport,
    ProfileUpdate, Session, SectionToggles, StoredRecord,
};
use domain::{DomainError, DomainResult, HistoryRepository, UserId};
use export::PdfExporter;
use llm::{LlmError, LlmResult, TextGenerator};
use mockall::mock;
use std::sync::Arc;
use storage::SqliteStore;
use tempfile::TempDir;

mock! {
    pub Generator {}

    #[async_trait]
    impl TextGenerator for Generator {
        async fn generate(&self, prompt: &str) -> LlmResult<String>;
        fn model(&self) -> &str;
    }
}

mock! {
    pub History {}

    #[async_trait]
    impl HistoryRepository for History {
        async fn save_analysis(
            &self,
            user_id: &UserId,
            analysis: &ComparativeAnalysis,
        ) -> DomainResult<StoredRecord<ComparativeAnalysis>>;
        async fn get_user_analyses(
            &self,
            user_id: &UserId,
        ) -> DomainResult<Vec<StoredRecord<ComparativeAnalysis>>>;
        async fn save_prediction(
            &self,
            user_id: &UserId,
            prediction: &InsightReport,
        ) -> DomainResult<StoredRecord<InsightReport>>;
        async fn get_user_predictions(
            &self,
            user_id: &UserId,
        ) -> DomainResult<Vec<StoredRecord<InsightReport>>>;
        async fn save_business_plan(
            &self,
            user_id: &UserId,
            plan: &GeneratedBusinessPlan,
        ) -> DomainResult<StoredRecord<GeneratedBusinessPlan>>;
        async fn get_user_business_plans(
            &self,
            user_id: &UserId,
        ) -> DomainResult<Vec<StoredRecord<GeneratedBusinessPlan>>>;
    }
}

struct Harness {
    dir: TempDir,
    app: AppContainer,
}

fn harness(generator: MockGenerator) -> Harness {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = Arc::new(
        SqliteStore::open(dir.path().join("prediktor.db"), 2).expect("failed to open store"),
    );
    let app = AppContainer::with_parts(
        store,
        Arc::new(generator),
        PdfExporter::new(dir.path().join("exports")),
    );
    Harness { dir, app }
}

/// Every call answers with an empty JSON object, which normalizes to defaults
fn answering_empty_json(times: usize) -> MockGenerator {
    let mut generator = MockGenerator::new();
    generator
        .expect_generate()
        .times(times)
        .returning(|_| Ok("{}".to_string()));
    generator
}

fn failing_with(error: LlmError) -> MockGenerator {
    let mut generator = MockGenerator::new();
    generator
        .expect_generate()
        .returning(move |_| Err(error.clone()));
    generator
}

fn company() -> CompanyData {
    CompanyData {
        year: "2024".to_string(),
        revenue: 5_000_000.0,
        expenses: 3_500_000.0,
        employees: 10,
        sector: "Commerce".to_string(),
        market: "Local".to_string(),
    }
}

fn plan_request() -> BusinessPlanRequest {
    BusinessPlanRequest {
        company_name: "Koné Import".to_string(),
        industry: "Commerce".to_string(),
        description: "Import de matériel agricole".to_string(),
        market_size: "2000000000".to_string(),
        target_market: "Coopératives".to_string(),
        competitive_advantage: "Réseau local".to_string(),
        revenue_model: "Vente directe".to_string(),
        funding_required: "75000000".to_string(),
        team_size: "6".to_string(),
        timeline: "3 ans".to_string(),
        sections: SectionToggles::default(),
    }
}

async fn signed_in(auth: &AuthService) -> Session {
    auth.register("awa@example.ci", "motdepasse")
        .await
        .expect("registration failed")
}

#[tokio::test]
async fn test_live_analysis_is_stored() {
    let h = harness(answering_empty_json(3));
    let session = signed_in(&h.app.auth).await;

    let outcome = h.app.analysis.run_analysis(&session, &company()).await.unwrap();
    assert!(!outcome.is_demo());
    assert_eq!(outcome.analysis().company_data, company());

    let stored = h.app.history.analyses(&session).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].user_id, session.user_id);
    assert_eq!(&stored[0].record, outcome.analysis());
}

#[tokio::test]
async fn test_demo_analysis_is_not_stored() {
    let h = harness(failing_with(LlmError::Http {
        status: 500,
        body: "boom".to_string(),
    }));
    let session = signed_in(&h.app.auth).await;

    let outcome = h.app.analysis.run_analysis(&session, &company()).await.unwrap();
    assert!(outcome.is_demo());
    assert_eq!(outcome.analysis().company_data, company());
    assert!(h.app.history.analyses(&session).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_company_rejected_before_any_call() {
    let h = harness(answering_empty_json(0));
    let session = signed_in(&h.app.auth).await;

    let mut figures = company();
    figures.employees = 0;
    figures.expenses = 9_000_000.0;
    let error = h
        .app
        .analysis
        .run_analysis(&session, &figures)
        .await
        .unwrap_err();

    match error {
        ApplicationError::Domain(DomainError::InvalidCompanyData(violations)) => {
            assert_eq!(violations.len(), 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_history_write_is_dropped() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(SqliteStore::open(dir.path().join("p.db"), 2).unwrap());

    let mut history = MockHistory::new();
    history
        .expect_save_analysis()
        .times(1)
        .returning(|_, _| Err(DomainError::Storage("disk full".to_string())));

    let workflow = AnalysisWorkflow::new(
        analysis::AnalysisService::new(Arc::new(answering_empty_json(3))),
        Arc::new(history),
        store,
    );
    let session = Session {
        token: "t".to_string(),
        user_id: UserId::generate(),
        email: "awa@example.ci".to_string(),
        issued_at: Utc::now(),
    };

    let outcome = workflow.run_analysis(&session, &company()).await.unwrap();
    assert!(!outcome.is_demo());
}

#[tokio::test]
async fn test_action_plan_quota_surfaces_notice() {
    let h = harness(failing_with(LlmError::QuotaExceeded {
        body: String::new(),
    }));
    let session = signed_in(&h.app.auth).await;
    let analysis = analysis::fallback::demo_analysis(&company());

    let error = h
        .app
        .analysis
        .action_plan(&session, &analysis)
        .await
        .unwrap_err();
    assert!(error.is_quota());
    let notice = error.notice();
    assert_eq!(notice.title, "Limite d'API atteinte");
    assert!(notice.message.contains("Quota API dépassé"));
}

#[tokio::test]
async fn test_insights_need_a_stored_analysis() {
    let h = harness(answering_empty_json(3));
    let session = signed_in(&h.app.auth).await;

    let missing = h.app.insights.generate(&session, Utc::now()).await.unwrap_err();
    assert!(matches!(missing, ApplicationError::NoRecentAnalysis));
    assert_eq!(
        missing.notice().message,
        "Aucune analyse récente trouvée. Veuillez effectuer une analyse sectorielle."
    );

    h.app.analysis.run_analysis(&session, &company()).await.unwrap();
    h.app
        .profiles
        .update(
            &session,
            &session.user_id,
            ProfileUpdate {
                company_name: Some("Koné Import".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let report = h.app.insights.generate(&session, Utc::now()).await.unwrap();
    assert!(!report.metadata.is_demo_data);
    assert_eq!(report.metadata.company_name, "Koné Import");
    assert_eq!(report.metadata.sector, "Commerce");
    assert_eq!(report.growth_data.monthly_projections.len(), 25);

    let predictions = h.app.history.predictions(&session).await.unwrap();
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].record, report);
}

#[tokio::test]
async fn test_business_plan_is_stored_and_exported() {
    let h = harness(answering_empty_json(1));
    let session = signed_in(&h.app.auth).await;

    let plan = h
        .app
        .business_plans
        .generate(&session, &plan_request())
        .await
        .unwrap();
    assert_eq!(plan.metadata.company_name, "Koné Import");

    let stored = h.app.history.business_plans(&session).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].record, plan);

    let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
    let path = h
        .app
        .export
        .export_latest_plan(&session, today)
        .await
        .unwrap();
    assert_eq!(
        path,
        h.dir
            .path()
            .join("exports")
            .join("Business_Plan_Koné_Import_2025-06-30.pdf")
    );
    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_business_plan_missing_fields_notice() {
    let h = harness(answering_empty_json(0));
    let session = signed_in(&h.app.auth).await;

    let mut request = plan_request();
    request.description = String::new();
    let error = h
        .app
        .business_plans
        .generate(&session, &request)
        .await
        .unwrap_err();
    assert_eq!(error.notice().title, "Données manquantes");
    assert!(h.app.history.business_plans(&session).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_export_without_plan() {
    let h = harness(answering_empty_json(0));
    let session = signed_in(&h.app.auth).await;
    let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();

    let error = h
        .app
        .export
        .export_latest_plan(&session, today)
        .await
        .unwrap_err();
    assert!(matches!(error, ApplicationError::NoBusinessPlan));
    assert_eq!(error.notice().title, "Aucun plan généré");
}

#[tokio::test]
async fn test_profile_owner_rule_and_completion() {
    let h = harness(answering_empty_json(0));
    let session = signed_in(&h.app.auth).await;

    let someone_else = UserId::generate();
    let denied = h
        .app
        .profiles
        .update(&session, &someone_else, ProfileUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(
        denied,
        ApplicationError::Domain(DomainError::NotProfileOwner { .. })
    ));

    let profile = h
        .app
        .profiles
        .update(
            &session,
            &session.user_id,
            ProfileUpdate {
                first_name: Some("Awa".into()),
                last_name: Some("Koné".into()),
                company_name: Some("Koné Import".into()),
                industry: Some("Commerce".into()),
                country: Some("Côte d'Ivoire".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(profile.is_profile_complete);
    assert_eq!(profile.completion_percentage(), 100);

    let stats = h.app.profiles.stats(&session).await.unwrap();
    assert_eq!(stats.total_users, 1);
    assert_eq!(stats.complete_profiles, 1);
    assert_eq!(stats.top_industries[0].industry, "Commerce");

    let shown = h.app.profiles.show(&session).await.unwrap();
    assert_eq!(shown, profile);
}

#[tokio::test]
async fn test_container_from_config_talks_to_gemini() {
    let mut server = mockito::Server::new_async().await;
    let envelope = serde_json::json!({
        "candidates": [{"content": {"parts": [{"text": "```json\n{}\n```"}]}}]
    });
    let mock = server
        .mock("POST", "/v1beta/models/gemini-2.5-pro:generateContent")
        .match_query(mockito::Matcher::UrlEncoded(
            "key".into(),
            "test-key".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope.to_string())
        .expect(3)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = PrediktorConfig::default();
    config.llm.api_key = Some("test-key".to_string());
    config.llm.base_url = server.url();
    config.storage.database_path = Some(dir.path().join("prediktor.db"));
    config.export.output_dir = dir.path().join("exports");

    let app = AppContainer::from_config(&config).unwrap();
    let session = app
        .auth
        .register("awa@example.ci", "motdepasse")
        .await
        .unwrap();
    let outcome = app.analysis.run_analysis(&session, &company()).await.unwrap();

    assert!(!outcome.is_demo());
    mock.assert_async().await;
    assert_eq!(app.history.analyses(&session).await.unwrap().len(), 1);
}
