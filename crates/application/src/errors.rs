//! Application Layer Errors
//!
//! Every error a workflow can surface, and the notice shown for it.

use analysis::AnalysisError;
use domain::errors::DomainError;
use export::ExportError;
use thiserror::Error;

use crate::notice::UserNotice;

#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain layer errors
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Action plan generation failed; no demo plan exists
    #[error("Action plan generation failed: {0}")]
    ActionPlan(#[source] AnalysisError),

    /// Business plan generation or validation failed
    #[error("Business plan generation failed: {0}")]
    BusinessPlan(#[source] AnalysisError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    /// Command needs a signed-in user
    #[error("Not signed in")]
    Unauthenticated,

    #[error("Password is shorter than {min} characters")]
    WeakPassword { min: usize },

    #[error("Too many failed sign-in attempts for {email}")]
    TooManyAttempts { email: String },

    /// Sign-in failed for a reason other than bad credentials
    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("No stored analysis for this user")]
    NoRecentAnalysis,

    #[error("No stored business plan for this user")]
    NoBusinessPlan,

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ApplicationError {
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Check if the generative API refused the call for quota reasons
    pub fn is_quota(&self) -> bool {
        match self {
            Self::ActionPlan(e) | Self::BusinessPlan(e) => e.is_quota(),
            _ => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Domain(_) => "domain",
            Self::ActionPlan(_) | Self::BusinessPlan(_) => "generation",
            Self::Export(_) => "export",
            Self::Unauthenticated
            | Self::WeakPassword { .. }
            | Self::TooManyAttempts { .. }
            | Self::LoginFailed(_) => "auth",
            Self::NoRecentAnalysis | Self::NoBusinessPlan => "not_found",
            Self::Configuration { .. } => "configuration",
        }
    }

    /// Dismissable message for the user; never retried
    pub fn notice(&self) -> UserNotice {
        match self {
            Self::ActionPlan(e) | Self::BusinessPlan(e) if e.is_quota() => {
                UserNotice::new("Limite d'API atteinte", e.to_string())
            }
            Self::Domain(e) => domain_notice(e),
            Self::ActionPlan(_) => UserNotice::new(
                "Erreur",
                "Impossible de générer le plan d'action. Veuillez réessayer.",
            ),
            Self::BusinessPlan(AnalysisError::Validation(_)) => UserNotice::new(
                "Données manquantes",
                "Veuillez remplir au minimum le nom de l'entreprise, le secteur et la description.",
            ),
            Self::BusinessPlan(_) => UserNotice::new(
                "Erreur de génération",
                "Impossible de générer le business plan. Veuillez réessayer.",
            ),
            Self::Export(_) => UserNotice::new(
                "Erreur d'export",
                "Impossible d'exporter le document. Veuillez réessayer.",
            ),
            Self::Unauthenticated => UserNotice::new(
                "Connexion requise",
                "Veuillez vous connecter pour accéder à cette fonctionnalité.",
            ),
            Self::WeakPassword { min } => UserNotice::new(
                "Inscription impossible",
                format!("Le mot de passe doit contenir au moins {min} caractères."),
            ),
            Self::TooManyAttempts { .. } => UserNotice::new(
                "Connexion impossible",
                "L'accès à ce compte a été bloqué temporairement suite à de trop nombreuses tentatives. Veuillez réessayer plus tard.",
            ),
            Self::LoginFailed(_) => UserNotice::new(
                "Connexion impossible",
                "Une erreur est survenue lors de la connexion.",
            ),
            Self::NoRecentAnalysis => UserNotice::new(
                "Aucune analyse",
                "Aucune analyse récente trouvée. Veuillez effectuer une analyse sectorielle.",
            ),
            Self::NoBusinessPlan => UserNotice::new(
                "Aucun plan généré",
                "Veuillez d'abord générer un business plan.",
            ),
            Self::Configuration { message } => UserNotice::new("Configuration invalide", message),
        }
    }
}

fn domain_notice(error: &DomainError) -> UserNotice {
    match error {
        DomainError::InvalidCredentials => UserNotice::new(
            "Connexion impossible",
            "L'adresse e-mail ou le mot de passe est incorrect.",
        ),
        DomainError::InvalidEmail(_) => UserNotice::new(
            "Connexion impossible",
            "Le format de l'adresse e-mail n'est pas valide.",
        ),
        DomainError::InvalidSession => UserNotice::new(
            "Session expirée",
            "Votre session a expiré. Veuillez vous reconnecter.",
        ),
        DomainError::AccountExists(_) => UserNotice::new(
            "Inscription impossible",
            "Un compte existe déjà pour cette adresse e-mail.",
        ),
        DomainError::InvalidCompanyData(violations) => {
            UserNotice::new("Données invalides", violations.join("\n"))
        }
        DomainError::NotProfileOwner { .. } => UserNotice::new(
            "Accès refusé",
            "Vous ne pouvez modifier que votre propre profil.",
        ),
        DomainError::MissingField(field) => UserNotice::new(
            "Données manquantes",
            format!("Le champ {field} est requis."),
        ),
        DomainError::RecordNotFound(_) => UserNotice::new(
            "Introuvable",
            "La donnée demandée n'existe pas.",
        ),
        DomainError::InvalidUserId(_) | DomainError::Storage(_) => UserNotice::new(
            "Erreur",
            "Une erreur inattendue est survenue. Veuillez réessayer.",
        ),
    }
}
