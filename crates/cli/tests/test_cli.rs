use application::{AppContainer, ApplicationError, UnavailableGenerator};
use clap::Parser;
use cli::commands::business_plan::PlanSection;
use cli::commands::history::HistoryKind;
use cli::commands::{account, ActionPlanCommand, AnalyzeCommand, LoginCommand, RegisterCommand};
use cli::{Cli, CliContext, Commands, SessionStore};
use export::PdfExporter;
use llm::LlmError;
use std::sync::Arc;
use storage::SqliteStore;
use tempfile::TempDir;

fn offline_context(dir: &TempDir) -> CliContext {
    let store = Arc::new(SqliteStore::open(dir.path().join("cli.db"), 2).expect("store"));
    let generator = Arc::new(UnavailableGenerator::new(LlmError::MissingApiKey));
    let app = AppContainer::with_parts(store, generator, PdfExporter::new(dir.path().join("out")));
    CliContext::new(app, SessionStore::new(dir.path().join("session")))
}

fn analyze_args() -> AnalyzeCommand {
    AnalyzeCommand {
        year: "2024".into(),
        revenue: 5_000_000.0,
        expenses: 3_500_000.0,
        employees: 10,
        sector: "Commerce".into(),
        market: "Abidjan".into(),
        json: false,
    }
}

#[test]
fn test_parse_analyze_command() {
    let cli = Cli::try_parse_from([
        "prediktor",
        "analyze",
        "--year",
        "2024",
        "--revenue",
        "5000000",
        "--expenses",
        "3500000",
        "--employees",
        "10",
        "--sector",
        "Commerce",
        "--market",
        "Abidjan",
    ])
    .unwrap();

    let Commands::Analyze(command) = cli.command else {
        panic!("expected analyze");
    };
    let company = command.company();
    assert_eq!(company.revenue, 5_000_000.0);
    assert_eq!(company.employees, 10);
    assert!(company.validate().is_ok());
    assert!(!command.json);
}

#[test]
fn test_analyze_requires_every_figure() {
    assert!(Cli::try_parse_from(["prediktor", "analyze", "--year", "2024"]).is_err());
}

#[test]
fn test_parse_business_plan_toggles() {
    let cli = Cli::try_parse_from([
        "prediktor",
        "business-plan",
        "--company",
        "Koné Import",
        "--industry",
        "Commerce",
        "--description",
        "Import de matériel",
        "--skip",
        "funding",
        "--skip",
        "organization",
        "--appendices",
        "--export",
    ])
    .unwrap();

    let Commands::BusinessPlan(command) = cli.command else {
        panic!("expected business-plan");
    };
    assert_eq!(command.skip, vec![PlanSection::Funding, PlanSection::Organization]);
    assert!(command.export);

    let request = command.request();
    assert!(request.validate().is_ok());
    assert!(!request.sections.funding);
    assert!(!request.sections.organization);
    assert!(request.sections.market_analysis);
    assert!(request.sections.appendices);
    assert_eq!(request.market_size, "");
}

#[test]
fn test_parse_history_and_global_flags() {
    let cli = Cli::try_parse_from([
        "prediktor",
        "history",
        "plans",
        "--verbose",
        "--config",
        "/etc/prediktor.toml",
    ])
    .unwrap();

    assert!(cli.verbose);
    assert_eq!(
        cli.config.as_deref().and_then(|p| p.to_str()),
        Some("/etc/prediktor.toml")
    );
    let Commands::History(command) = cli.command else {
        panic!("expected history");
    };
    assert_eq!(command.kind, HistoryKind::Plans);

    assert!(Cli::try_parse_from(["prediktor", "history", "everything"]).is_err());
}

#[test]
fn test_parse_profile_update() {
    let cli = Cli::try_parse_from([
        "prediktor",
        "profile",
        "update",
        "--first-name",
        "Awa",
        "--weekly-reports",
        "true",
    ])
    .unwrap();

    let Commands::Profile(command) = cli.command else {
        panic!("expected profile");
    };
    let cli::commands::ProfileSubcommand::Update(args) = command.command else {
        panic!("expected update");
    };
    let update = args.update();
    assert_eq!(update.first_name.as_deref(), Some("Awa"));
    assert_eq!(update.weekly_reports, Some(true));
    assert_eq!(update.last_name, None);
}

#[tokio::test]
async fn test_commands_refuse_to_run_signed_out() {
    let dir = TempDir::new().unwrap();
    let ctx = offline_context(&dir);

    let error = analyze_args().execute(&ctx).await.unwrap_err();
    assert!(matches!(
        error.downcast_ref::<ApplicationError>(),
        Some(ApplicationError::Unauthenticated)
    ));
}

#[tokio::test]
async fn test_register_logout_login_keeps_token_file_in_sync() {
    let dir = TempDir::new().unwrap();
    let ctx = offline_context(&dir);

    RegisterCommand {
        email: "awa@example.ci".into(),
        password: Some("motdepasse".into()),
    }
    .execute(&ctx)
    .await
    .unwrap();
    let first = ctx.session().await.unwrap();
    assert_eq!(first.email, "awa@example.ci");

    account::logout(&ctx).await.unwrap();
    assert_eq!(ctx.sessions.load().await.unwrap(), None);
    assert!(ctx.session().await.is_err());

    LoginCommand {
        email: "AWA@example.ci".into(),
        password: Some("motdepasse".into()),
    }
    .execute(&ctx)
    .await
    .unwrap();
    let second = ctx.session().await.unwrap();
    assert_eq!(second.user_id, first.user_id);
    assert_ne!(second.token, first.token);
}

#[tokio::test]
async fn test_demo_analysis_leaves_nothing_for_action_plan() {
    let dir = TempDir::new().unwrap();
    let ctx = offline_context(&dir);
    RegisterCommand {
        email: "awa@example.ci".into(),
        password: Some("motdepasse".into()),
    }
    .execute(&ctx)
    .await
    .unwrap();

    // Without an API key the analysis falls back to demo data, which is not stored
    analyze_args().execute(&ctx).await.unwrap();

    let error = ActionPlanCommand { json: false }
        .execute(&ctx)
        .await
        .unwrap_err();
    let app_error = error.downcast_ref::<ApplicationError>().unwrap();
    assert!(matches!(app_error, ApplicationError::NoRecentAnalysis));
    assert_eq!(
        app_error.notice().message,
        "Aucune analyse récente trouvée. Veuillez effectuer une analyse sectorielle."
    );
}
