use domain::entities::{ProfileUpdate, Session};
use domain::{
    CredentialRepository, DomainError, HistoryRepository, ProfileRepository, SessionRepository,
    UserId,
};
use domain::entities::{Credential, GeneratedBusinessPlan, PlanMetadata, Section};
use storage::SqliteStore;
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> SqliteStore {
    SqliteStore::open(dir.path().join("prediktor.db"), 2).expect("failed to open store")
}

fn section(title: &str) -> Section {
    Section {
        title: title.to_string(),
        content: String::new(),
        subsections: Some(vec![]),
    }
}

fn plan(company: &str) -> GeneratedBusinessPlan {
    GeneratedBusinessPlan {
        executive_summary: section("Résumé Exécutif"),
        company_description: section("Description de l'Entreprise"),
        market_analysis: section("Analyse de Marché"),
        organization: section("Organisation et Management"),
        products_services: section("Produits et Services"),
        marketing_sales: section("Marketing et Ventes"),
        financial_projections: section("Projections Financières"),
        funding: section("Financement Requis"),
        appendices: None,
        metadata: PlanMetadata {
            generated_at: "2025-01-01T00:00:00.000Z".to_string(),
            company_name: company.to_string(),
            industry: "Commerce".to_string(),
            total_pages: 25,
        },
    }
}

#[tokio::test]
async fn test_history_is_newest_first_and_owned() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = open_store(&dir);
    let alice = UserId::parse("alice").unwrap();
    let bob = UserId::parse("bob").unwrap();

    for i in 0..5 {
        store
            .save_business_plan(&alice, &plan(&format!("Plan {i}")))
            .await
            .expect("save failed");
    }
    store.save_business_plan(&bob, &plan("Bob")).await.unwrap();

    let records = store.get_user_business_plans(&alice).await.unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(records[0].record.metadata.company_name, "Plan 4");
    assert_eq!(records[4].record.metadata.company_name, "Plan 0");
    for pair in records.windows(2) {
        assert!(pair[0].created_at > pair[1].created_at);
    }
    assert!(records.iter().all(|r| r.user_id == alice));

    assert_eq!(store.get_user_business_plans(&bob).await.unwrap().len(), 1);
    assert!(store.get_user_analyses(&alice).await.unwrap().is_empty());
    assert!(store.get_user_predictions(&alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_timestamps_keep_increasing_after_reopen() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let user = UserId::parse("u1").unwrap();

    let first = {
        let store = open_store(&dir);
        store.save_business_plan(&user, &plan("A")).await.unwrap()
    };
    let store = open_store(&dir);
    let second = store.save_business_plan(&user, &plan("B")).await.unwrap();

    assert!(second.created_at > first.created_at);
    let records = store.get_user_business_plans(&user).await.unwrap();
    assert_eq!(records[0].id, second.id);
}

#[tokio::test]
async fn test_profile_lifecycle() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = open_store(&dir);
    let user = UserId::parse("u1").unwrap();

    assert!(store.load_profile(&user).await.unwrap().is_none());
    let created = store.create_profile(&user, "awa@koné.ci").await.unwrap();
    assert_eq!(created.currency, "EUR");
    assert!(!created.is_profile_complete);

    let update = ProfileUpdate {
        first_name: Some("Awa".into()),
        last_name: Some("Koné".into()),
        company_name: Some("Koné Import".into()),
        industry: Some("Commerce".into()),
        ..ProfileUpdate::default()
    };
    let partial = store.update_profile(&user, update).await.unwrap();
    assert_eq!(partial.completion_percentage(), 80);
    assert!(!partial.is_profile_complete);
    assert!(store.users_by_industry("Commerce").await.unwrap().is_empty());

    let complete = store
        .update_profile(
            &user,
            ProfileUpdate {
                country: Some("Côte d'Ivoire".into()),
                ..ProfileUpdate::default()
            },
        )
        .await
        .unwrap();
    assert!(complete.is_profile_complete);
    assert_eq!(complete.completion_percentage(), 100);
    assert!(complete.updated_at >= complete.created_at);

    let loaded = store.load_profile(&user).await.unwrap().unwrap();
    assert_eq!(loaded, complete);
    assert_eq!(store.users_by_industry("Commerce").await.unwrap().len(), 1);

    let stats = store.profile_stats().await.unwrap();
    assert_eq!(stats.total_users, 1);
    assert_eq!(stats.complete_profiles, 1);
    assert_eq!(stats.top_industries[0].industry, "Commerce");
}

#[tokio::test]
async fn test_update_of_missing_profile_is_not_found() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = open_store(&dir);
    let err = store
        .update_profile(&UserId::parse("ghost").unwrap(), ProfileUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::RecordNotFound(_)));
}

#[tokio::test]
async fn test_credentials_and_sessions() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = open_store(&dir);
    let user = UserId::generate();
    let credential = Credential {
        user_id: user.clone(),
        email: "awa@example.ci".to_string(),
        salt: "c2FsdA".to_string(),
        password_hash: "abc123".to_string(),
        iterations: 100_000,
        failed_attempts: 0,
        locked_until: None,
        created_at: chrono::Utc::now(),
    };

    store.insert_credential(&credential).await.unwrap();
    let duplicate = store.insert_credential(&credential).await.unwrap_err();
    assert_eq!(
        duplicate,
        DomainError::AccountExists("awa@example.ci".to_string())
    );

    let found = store.find_by_email("awa@example.ci").await.unwrap().unwrap();
    assert_eq!(found.user_id, user);
    assert_eq!(found.password_hash, "abc123");
    assert_eq!(found.iterations, 100_000);
    assert!(store.find_by_email("nobody@example.ci").await.unwrap().is_none());

    let until = chrono::Utc::now() + chrono::Duration::minutes(15);
    store
        .update_login_state("awa@example.ci", 5, Some(until))
        .await
        .unwrap();
    let locked = store.find_by_email("awa@example.ci").await.unwrap().unwrap();
    assert_eq!(locked.failed_attempts, 5);
    assert!(locked.is_locked_at(chrono::Utc::now()));
    store.update_login_state("awa@example.ci", 0, None).await.unwrap();
    let cleared = store.find_by_email("awa@example.ci").await.unwrap().unwrap();
    assert_eq!(cleared.failed_attempts, 0);
    assert_eq!(cleared.locked_until, None);
    assert!(matches!(
        store.update_login_state("nobody@example.ci", 1, None).await,
        Err(DomainError::RecordNotFound(_))
    ));

    let session = Session {
        token: "tok-1".to_string(),
        user_id: user.clone(),
        email: credential.email.clone(),
        issued_at: chrono::Utc::now(),
    };
    store.insert_session(&session).await.unwrap();
    let loaded = store.find_session("tok-1").await.unwrap().unwrap();
    assert_eq!(loaded.user_id, user);

    assert!(store.revoke_session("tok-1").await.unwrap());
    assert!(!store.revoke_session("tok-1").await.unwrap());
    assert!(store.find_session("tok-1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_undecodable_document_does_not_hide_the_rest() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = open_store(&dir);
    let alice = UserId::parse("alice").unwrap();
    store.save_business_plan(&alice, &plan("Koné Import")).await.unwrap();

    // A non-finite figure serialized by serde_json comes back as null
    let conn = rusqlite::Connection::open(dir.path().join("prediktor.db")).unwrap();
    conn.execute(
        "INSERT INTO documents (id, collection, user_id, created_at, body)
         VALUES ('broken', 'businessPlans', 'alice', '2999-01-01T00:00:00.000Z', '{\"metadata\":null}')",
        [],
    )
    .unwrap();

    let records = store.get_user_business_plans(&alice).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].record.metadata.company_name, "Koné Import");
}
