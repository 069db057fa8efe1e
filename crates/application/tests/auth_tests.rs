use application::services::auth_service::{LOCKOUT_MINUTES, MAX_FAILED_ATTEMPTS};
use application::services::AuthService;
use application::ApplicationError;
use chrono::{Duration, Utc};
use domain::{CredentialRepository, DomainError, ProfileRepository};
use std::sync::Arc;
use storage::SqliteStore;
use tempfile::TempDir;

fn auth_service(dir: &TempDir) -> (AuthService, Arc<SqliteStore>) {
    let store = Arc::new(
        SqliteStore::open(dir.path().join("auth.db"), 2).expect("failed to open store"),
    );
    (service_over(&store), store)
}

/// A fresh service over an existing store, as a new `prediktor` run would build
fn service_over(store: &Arc<SqliteStore>) -> AuthService {
    AuthService::new(store.clone(), store.clone(), store.clone()).with_hash_iterations(1_000)
}

#[tokio::test]
async fn test_register_login_logout_cycle() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let (auth, store) = auth_service(&dir);

    let registered = auth.register(" Awa@Example.CI ", "motdepasse").await?;
    assert_eq!(registered.email, "awa@example.ci");

    // Registration creates the blank profile
    let profile = store.load_profile(&registered.user_id).await?.unwrap();
    assert_eq!(profile.email, "awa@example.ci");
    assert!(!profile.is_profile_complete);

    let session = auth.login("awa@example.ci", "motdepasse").await?;
    assert_eq!(session.user_id, registered.user_id);
    assert_ne!(session.token, registered.token);

    let guarded = auth.require_session(Some(&session.token)).await?;
    assert_eq!(guarded, session);

    assert!(auth.logout(&session).await?);
    assert!(matches!(
        auth.require_session(Some(&session.token)).await,
        Err(ApplicationError::Unauthenticated)
    ));
    // Logging out twice is harmless
    assert!(!auth.logout(&session).await?);
    Ok(())
}

#[tokio::test]
async fn test_guard_rejects_missing_token() {
    let dir = TempDir::new().unwrap();
    let (auth, _) = auth_service(&dir);

    for token in [None, Some(""), Some("   "), Some("unknown-token")] {
        let error = auth.require_session(token).await.unwrap_err();
        assert!(matches!(error, ApplicationError::Unauthenticated));
        assert_eq!(error.notice().title, "Connexion requise");
    }
}

#[tokio::test]
async fn test_login_failure_messages() {
    let dir = TempDir::new().unwrap();
    let (auth, _) = auth_service(&dir);
    auth.register("awa@example.ci", "motdepasse").await.unwrap();

    let wrong_password = auth.login("awa@example.ci", "mauvais").await.unwrap_err();
    assert!(matches!(
        wrong_password,
        ApplicationError::Domain(DomainError::InvalidCredentials)
    ));
    assert_eq!(
        wrong_password.notice().message,
        "L'adresse e-mail ou le mot de passe est incorrect."
    );

    let unknown = auth.login("nobody@example.ci", "motdepasse").await.unwrap_err();
    assert_eq!(
        unknown.notice().message,
        "L'adresse e-mail ou le mot de passe est incorrect."
    );

    let malformed = auth.login("awa-at-example", "motdepasse").await.unwrap_err();
    assert_eq!(
        malformed.notice().message,
        "Le format de l'adresse e-mail n'est pas valide."
    );
}

#[tokio::test]
async fn test_registration_rules() {
    let dir = TempDir::new().unwrap();
    let (auth, _) = auth_service(&dir);

    assert!(matches!(
        auth.register("awa@example.ci", "12345").await,
        Err(ApplicationError::WeakPassword { min: 6 })
    ));

    auth.register("awa@example.ci", "motdepasse").await.unwrap();
    let duplicate = auth
        .register("AWA@example.ci", "autrepasse")
        .await
        .unwrap_err();
    assert!(matches!(
        duplicate,
        ApplicationError::Domain(DomainError::AccountExists(_))
    ));
}

#[tokio::test]
async fn test_lock_survives_a_new_service_and_expires() {
    let dir = TempDir::new().unwrap();
    let (auth, store) = auth_service(&dir);
    auth.register("awa@example.ci", "motdepasse").await.unwrap();

    // Each failed run of `prediktor login` is a separate service instance
    for _ in 0..MAX_FAILED_ATTEMPTS {
        let error = service_over(&store)
            .login("awa@example.ci", "mauvais")
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            ApplicationError::Domain(DomainError::InvalidCredentials)
        ));
    }

    let locked = service_over(&store)
        .login("awa@example.ci", "motdepasse")
        .await
        .unwrap_err();
    assert!(matches!(locked, ApplicationError::TooManyAttempts { .. }));
    assert!(locked
        .notice()
        .message
        .starts_with("L'accès à ce compte a été bloqué temporairement"));

    let later = Utc::now() + Duration::minutes(LOCKOUT_MINUTES + 1);
    service_over(&store)
        .login_at("awa@example.ci", "motdepasse", later)
        .await
        .unwrap();
    let credential = store.find_by_email("awa@example.ci").await.unwrap().unwrap();
    assert_eq!(credential.failed_attempts, 0);
    assert_eq!(credential.locked_until, None);
}

#[tokio::test]
async fn test_failure_after_expired_lock_starts_a_new_count() {
    let dir = TempDir::new().unwrap();
    let (auth, store) = auth_service(&dir);
    auth.register("awa@example.ci", "motdepasse").await.unwrap();

    for _ in 0..MAX_FAILED_ATTEMPTS {
        assert!(auth.login("awa@example.ci", "mauvais").await.is_err());
    }

    let later = Utc::now() + Duration::minutes(LOCKOUT_MINUTES + 1);
    let error = auth
        .login_at("awa@example.ci", "mauvais", later)
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        ApplicationError::Domain(DomainError::InvalidCredentials)
    ));
    let credential = store.find_by_email("awa@example.ci").await.unwrap().unwrap();
    assert_eq!(credential.failed_attempts, 1);
    assert_eq!(credential.locked_until, None);
    auth.login_at("awa@example.ci", "motdepasse", later)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_success_resets_failure_count() {
    let dir = TempDir::new().unwrap();
    let (auth, store) = auth_service(&dir);
    auth.register("awa@example.ci", "motdepasse").await.unwrap();

    for _ in 0..MAX_FAILED_ATTEMPTS - 1 {
        assert!(auth.login("awa@example.ci", "mauvais").await.is_err());
    }
    auth.login("awa@example.ci", "motdepasse").await.unwrap();
    let credential = store.find_by_email("awa@example.ci").await.unwrap().unwrap();
    assert_eq!(credential.failed_attempts, 0);

    assert!(auth.login("awa@example.ci", "mauvais").await.is_err());
    auth.login("awa@example.ci", "motdepasse").await.unwrap();
}

#[tokio::test]
async fn test_stored_hash_is_not_the_password() {
    let dir = TempDir::new().unwrap();
    let (auth, store) = auth_service(&dir);
    auth.register("awa@example.ci", "motdepasse").await.unwrap();

    let credential = store.find_by_email("awa@example.ci").await.unwrap().unwrap();
    assert_eq!(credential.iterations, 1_000);
    assert_eq!(credential.password_hash.len(), 64);
    assert!(!credential.password_hash.contains("motdepasse"));
}
